//! Operation descriptors: one row of the operation table per API operation.

pub mod catalog;

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

/// Value type of a bound parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamType {
    String,
    Integer,
    Long,
    Boolean,
    /// Epoch milliseconds on the wire
    Timestamp,
    StringList,
    StringMap,
    /// Arbitrary JSON document
    Json,
}

impl ParamType {
    /// Human readable description used in error messages
    pub fn expected(self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Integer | Self::Long => "an integer",
            Self::Boolean => "true or false",
            Self::Timestamp => "an RFC 3339 date-time or epoch milliseconds",
            Self::StringList => "a list of strings",
            Self::StringMap => "key=value pairs or a JSON object",
            Self::Json => "a JSON document",
        }
    }

    /// Whether the parameter accepts several values on the command line
    pub fn is_multi_valued(self) -> bool {
        matches!(self, Self::StringList | Self::StringMap)
    }
}

/// A single request field as exposed to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    /// Parameter name, e.g. `LogGroupName` or the flattened `DataSource_Name`
    pub name: String,
    /// Dotted location in the request body, e.g. `dataSource.name`
    pub path: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    /// List items are free text and are never split on commas
    #[serde(default)]
    pub free_text: bool,
    #[serde(default)]
    pub description: String,
}

impl ParameterDescriptor {
    pub fn path_segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('.')
    }

    /// True when the parameter is one field of a nested request object
    pub fn is_flattened(&self) -> bool {
        self.path.contains('.')
    }

    /// Long flag name, e.g. `log-group-name` or `data-source-name`
    pub fn flag_name(&self) -> String {
        self.flag
            .clone()
            .unwrap_or_else(|| self.name.to_case(Case::Kebab))
    }
}

/// Continuation token members of a paginated operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSpec {
    pub input_token: String,
    pub output_token: String,
}

/// Everything needed to bind, dispatch and project one API operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDescriptor {
    /// API operation name, e.g. `TagLogGroup`
    pub operation: String,
    /// Command name, e.g. `Add-CWLLogGroupTag`
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
    /// Wire names of the response members
    #[serde(default)]
    pub response_members: Vec<String>,
    /// Selector applied when the caller gives none; `None` means the command emits nothing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_select: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationSpec>,
    #[serde(default)]
    pub mutating: bool,
    /// Parameter whose value is shown in the confirmation prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm_target: Option<String>,
    /// Parameter echoed by `--pass-thru`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_thru: Option<String>,
}

impl OperationDescriptor {
    /// Case-insensitive parameter lookup
    pub fn parameter(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Case-insensitive response member lookup, returning the wire name
    pub fn response_member(&self, name: &str) -> Option<&str> {
        self.response_members
            .iter()
            .find(|m| m.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }

    pub fn is_paginated(&self) -> bool {
        self.pagination.is_some()
    }

    pub fn verb(&self) -> &str {
        self.command
            .split_once('-')
            .map_or(self.command.as_str(), |(verb, _)| verb)
    }

    /// Kebab-case alias, e.g. `add-log-group-tag` for `Add-CWLLogGroupTag`
    pub fn kebab_name(&self, command_prefix: &str) -> String {
        if let Some(alias) = &self.alias {
            return alias.clone();
        }
        let noun = self
            .command
            .split_once('-')
            .map_or(self.command.as_str(), |(_, noun)| noun);
        let noun = noun.strip_prefix(command_prefix).unwrap_or(noun);
        format!("{}-{}", self.verb().to_lowercase(), noun.to_case(Case::Kebab))
    }

    /// Positional parameters ordered by their declared index
    pub fn positional_parameters(&self) -> Vec<&ParameterDescriptor> {
        let mut positional: Vec<&ParameterDescriptor> = self
            .parameters
            .iter()
            .filter(|p| p.position.is_some())
            .collect();
        positional.sort_by_key(|p| p.position);
        positional
    }
}
