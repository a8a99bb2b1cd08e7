use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// Reply to an execute request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ExecuteReply {
    Ok {
        execution_count: u64,
        #[serde(default)]
        user_expressions: Map<String, Value>,
    },
    Error {
        execution_count: u64,
        ename: ErrorName,
        evalue: String,
        #[serde(default)]
        traceback: Vec<String>,
    },
}

impl ExecuteReply {
    pub fn ok(execution_count: u64) -> Self {
        ExecuteReply::Ok {
            execution_count,
            user_expressions: Map::new(),
        }
    }

    pub fn error(execution_count: u64, ename: ErrorName, evalue: impl Into<String>) -> Self {
        ExecuteReply::Error {
            execution_count,
            ename,
            evalue: evalue.into(),
            traceback: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ExecuteReply::Ok { .. })
    }

    pub fn execution_count(&self) -> u64 {
        match self {
            ExecuteReply::Ok {
                execution_count, ..
            }
            | ExecuteReply::Error {
                execution_count, ..
            } => *execution_count,
        }
    }
}

/// Error kind tag carried by an error reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorName {
    /// The agent has no usable provider; nothing was sent.
    ConfigurationError,
    #[serde(rename = "AIError")]
    AiError,
}

impl ErrorName {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorName::ConfigurationError => "ConfigurationError",
            ErrorName::AiError => "AIError",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelInfoReply {
    pub implementation: String,
    pub implementation_version: String,
    pub language_info: LanguageInfo,
    pub protocol_version: String,
    pub banner: String,
    pub help_links: Vec<HelpLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub name: String,
    pub version: String,
    pub mimetype: String,
    pub file_extension: String,
    pub pygments_lexer: String,
    pub nbconvert_exporter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpLink {
    pub text: String,
    pub url: String,
}
