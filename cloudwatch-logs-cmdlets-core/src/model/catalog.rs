//! Embedded CloudWatch Logs operation table
//!
//! The table is a JSON document compiled into the binary. Each entry describes
//! one API operation; the dispatcher interprets entries instead of carrying one
//! hand-written type per operation.

use super::OperationDescriptor;
use crate::error::CatalogError;
use rust_embed::RustEmbed;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

const LOGS_TABLE: &str = "logs.json";

#[derive(RustEmbed)]
#[folder = "resources/operations"]
#[include = "*.json"]
struct OperationTables;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableDocument {
    service: String,
    target_prefix: String,
    command_prefix: String,
    api_version: String,
    operations: Vec<OperationDescriptor>,
}

/// Validated, indexed operation table
#[derive(Debug)]
pub struct OperationCatalog {
    service: String,
    target_prefix: String,
    command_prefix: String,
    api_version: String,
    operations: Vec<OperationDescriptor>,
    index: HashMap<String, usize>,
}

impl OperationCatalog {
    /// Load the CloudWatch Logs table embedded at compile time
    pub fn embedded() -> Result<Self, CatalogError> {
        let start_time = std::time::Instant::now();
        let file = OperationTables::get(LOGS_TABLE)
            .ok_or_else(|| CatalogError::Missing(LOGS_TABLE.to_string()))?;
        let catalog = Self::from_json(&file.data)?;
        log::debug!(
            "Loaded {} operations for {} in {:?}",
            catalog.operations.len(),
            catalog.service,
            start_time.elapsed()
        );
        Ok(catalog)
    }

    /// Parse and validate an operation table document
    pub fn from_json(bytes: &[u8]) -> Result<Self, CatalogError> {
        let document: TableDocument = serde_json::from_slice(bytes)?;
        let mut index = HashMap::new();

        for (i, descriptor) in document.operations.iter().enumerate() {
            validate(descriptor)?;
            let keys = [
                descriptor.operation.clone(),
                descriptor.command.clone(),
                descriptor.kebab_name(&document.command_prefix),
            ];
            for key in keys {
                if index.insert(key.to_ascii_lowercase(), i).is_some_and(|prev| prev != i) {
                    return Err(CatalogError::invalid(
                        &descriptor.operation,
                        format!("name '{key}' is used by more than one operation"),
                    ));
                }
            }
        }

        Ok(Self {
            service: document.service,
            target_prefix: document.target_prefix,
            command_prefix: document.command_prefix,
            api_version: document.api_version,
            operations: document.operations,
            index,
        })
    }

    /// Look up by operation name, command name or kebab alias (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&OperationDescriptor> {
        self.index
            .get(&name.to_ascii_lowercase())
            .map(|&i| &self.operations[i])
    }

    pub fn operations(&self) -> &[OperationDescriptor] {
        &self.operations
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// JSON protocol target prefix, e.g. `Logs_20140328`
    pub fn target_prefix(&self) -> &str {
        &self.target_prefix
    }

    pub fn command_prefix(&self) -> &str {
        &self.command_prefix
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }
}

fn validate(descriptor: &OperationDescriptor) -> Result<(), CatalogError> {
    let op = &descriptor.operation;

    let mut names = HashSet::new();
    let mut positions = HashSet::new();
    let mut paths = HashSet::new();
    for param in &descriptor.parameters {
        if !names.insert(param.name.to_ascii_lowercase()) {
            return Err(CatalogError::invalid(op, format!("duplicate parameter {}", param.name)));
        }
        if !paths.insert(param.path.as_str()) {
            return Err(CatalogError::invalid(op, format!("duplicate request path {}", param.path)));
        }
        if param.path.split('.').any(str::is_empty) {
            return Err(CatalogError::invalid(op, format!("malformed request path {}", param.path)));
        }
        if let Some(position) = param.position {
            if !positions.insert(position) {
                return Err(CatalogError::invalid(op, format!("duplicate position {position}")));
            }
        }
    }

    for target in [&descriptor.pass_thru, &descriptor.confirm_target].into_iter().flatten() {
        if descriptor.parameter(target).is_none() {
            return Err(CatalogError::invalid(op, format!("unknown parameter {target}")));
        }
    }

    if let Some(select) = descriptor.default_select.as_deref() {
        if select != "*" && descriptor.response_member(select).is_none() {
            return Err(CatalogError::invalid(op, format!("default selector {select} is not a response member")));
        }
    }

    if let Some(pagination) = &descriptor.pagination {
        if descriptor.response_member(&pagination.output_token).is_none() {
            return Err(CatalogError::invalid(
                op,
                format!("pagination token {} is not a response member", pagination.output_token),
            ));
        }
        if descriptor.parameters.iter().any(|p| p.path == pagination.input_token) {
            return Err(CatalogError::invalid(
                op,
                "the pagination token must not also be a parameter",
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = OperationCatalog::embedded().expect("embedded catalog should load");
        assert_eq!(catalog.service(), "logs");
        assert_eq!(catalog.target_prefix(), "Logs_20140328");
        assert!(catalog.operations().len() >= 40);
    }

    #[rstest]
    #[case("TagLogGroup", "Add-CWLLogGroupTag")]
    #[case("add-cwlloggrouptag", "Add-CWLLogGroupTag")]
    #[case("add-log-group-tag", "Add-CWLLogGroupTag")]
    #[case("DescribeConfigurationTemplates", "Get-CWLConfigurationTemplate")]
    #[case("PutTransformer", "Write-CWLTransformer")]
    #[case("register-source-to-s3-table-integration", "Register-CWLSourceToS3TableIntegration")]
    fn test_lookup(#[case] name: &str, #[case] command: &str) {
        let catalog = OperationCatalog::embedded().expect("embedded catalog should load");
        let descriptor = catalog.get(name).expect("operation should resolve");
        assert_eq!(descriptor.command, command);
    }

    #[test]
    fn test_flattened_operations_present() {
        let catalog = OperationCatalog::embedded().expect("embedded catalog should load");

        let integration = catalog
            .get("AssociateSourceToS3TableIntegration")
            .expect("operation should exist");
        assert!(integration.parameter("DataSource_Name").is_some());
        assert!(integration.parameter("DataSource_Type").is_some());

        let delivery = catalog.get("CreateDelivery").expect("operation should exist");
        assert!(delivery
            .parameters
            .iter()
            .any(|p| p.path.starts_with("s3DeliveryConfiguration.")));
    }

    #[test]
    fn test_paginated_operations_use_next_token() {
        let catalog = OperationCatalog::embedded().expect("embedded catalog should load");
        let paginated: Vec<_> = catalog
            .operations()
            .iter()
            .filter(|d| d.is_paginated())
            .collect();
        assert!(!paginated.is_empty());
        for descriptor in paginated {
            let spec = descriptor.pagination.as_ref().expect("paginated");
            assert_eq!(spec.input_token, "nextToken", "{}", descriptor.operation);
            assert!(!descriptor.mutating, "{} should not be mutating", descriptor.operation);
        }
    }

    #[test]
    fn test_rejects_duplicate_parameters() {
        let doc = serde_json::json!({
            "service": "logs",
            "targetPrefix": "Logs_20140328",
            "commandPrefix": "CWL",
            "apiVersion": "2014-03-28",
            "operations": [{
                "operation": "DeleteLogGroup",
                "command": "Remove-CWLLogGroup",
                "parameters": [
                    {"name": "LogGroupName", "path": "logGroupName", "type": "string"},
                    {"name": "logGroupName", "path": "other", "type": "string"}
                ]
            }]
        });
        let err = OperationCatalog::from_json(doc.to_string().as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_unknown_pass_thru() {
        let doc = serde_json::json!({
            "service": "logs",
            "targetPrefix": "Logs_20140328",
            "commandPrefix": "CWL",
            "apiVersion": "2014-03-28",
            "operations": [{
                "operation": "DeleteLogGroup",
                "command": "Remove-CWLLogGroup",
                "parameters": [],
                "passThru": "LogGroupName"
            }]
        });
        let err = OperationCatalog::from_json(doc.to_string().as_bytes()).unwrap_err();
        assert!(err.to_string().contains("unknown parameter LogGroupName"));
    }

    #[test]
    fn test_rejects_duplicate_command_names() {
        let doc = serde_json::json!({
            "service": "logs",
            "targetPrefix": "Logs_20140328",
            "commandPrefix": "CWL",
            "apiVersion": "2014-03-28",
            "operations": [
                {"operation": "DeleteLogGroup", "command": "Remove-CWLLogGroup"},
                {"operation": "DeleteLogGroupAgain", "command": "Remove-CWLLogGroup"}
            ]
        });
        assert!(OperationCatalog::from_json(doc.to_string().as_bytes()).is_err());
    }
}
