//! API keys, error codes and the advertised API table.

use serde::Serialize;

pub const API_API_VERSIONS: i16 = 18;
pub const API_DESCRIBE_TOPIC_PARTITIONS: i16 = 75;

pub const ERROR_NONE: i16 = 0;
pub const ERROR_UNKNOWN_TOPIC_OR_PARTITION: i16 = 3;
pub const ERROR_UNSUPPORTED_VERSION: i16 = 35;

/// One entry of the ApiVersions response: an api key and its version range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApiDescriptor {
    pub api_key: i16,
    pub name: &'static str,
    pub min_version: i16,
    pub max_version: i16,
}

impl ApiDescriptor {
    pub const fn supports(&self, version: i16) -> bool {
        self.min_version <= version && version <= self.max_version
    }
}

static SUPPORTED_APIS: [ApiDescriptor; 2] = [
    ApiDescriptor {
        api_key: API_API_VERSIONS,
        name: "ApiVersions",
        min_version: 0,
        max_version: 4,
    },
    ApiDescriptor {
        api_key: API_DESCRIBE_TOPIC_PARTITIONS,
        name: "DescribeTopicPartitions",
        min_version: 0,
        max_version: 0,
    },
];

/// APIs this server advertises, in response order.
pub fn supported_apis() -> &'static [ApiDescriptor] {
    &SUPPORTED_APIS
}

/// Version range every request is checked against before dispatch.
pub fn api_versions_descriptor() -> &'static ApiDescriptor {
    &SUPPORTED_APIS[0]
}

pub fn find_api(api_key: i16) -> Option<&'static ApiDescriptor> {
    SUPPORTED_APIS.iter().find(|api| api.api_key == api_key)
}
