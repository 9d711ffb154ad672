//! Output selectors
//!
//! `*` emits the whole response, `^Name` echoes the bound value of parameter
//! `Name`, and any other expression names one response member.

use crate::binding::BoundParameters;
use crate::error::SelectorError;
use crate::model::OperationDescriptor;
use crate::types::InvocationOptions;
use serde_json::Value;

/// What a single invocation emits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// The operation has no output
    Nothing,
    /// The full response object
    Response,
    /// One response member, by wire name
    Field(String),
    /// The bound value of an input parameter
    Parameter(String),
}

impl Selector {
    /// Resolve the active selector, validating it against the descriptor.
    ///
    /// Runs before any request is sent.
    pub fn resolve(
        descriptor: &OperationDescriptor,
        options: &InvocationOptions,
    ) -> Result<Self, SelectorError> {
        if options.pass_thru {
            if options.select.is_some() {
                return Err(SelectorError::PassThruConflict);
            }
            let parameter = descriptor.pass_thru.as_deref().ok_or_else(|| {
                SelectorError::PassThruUnsupported {
                    command: descriptor.command.clone(),
                }
            })?;
            return Ok(Self::Parameter(parameter.to_string()));
        }

        match options.select.as_deref() {
            Some(expression) => Self::parse(descriptor, expression),
            None => match descriptor.default_select.as_deref() {
                Some(expression) => Self::parse(descriptor, expression),
                None => Ok(Self::Nothing),
            },
        }
    }

    fn parse(descriptor: &OperationDescriptor, expression: &str) -> Result<Self, SelectorError> {
        let expression = expression.trim();
        if expression.is_empty() {
            return Err(SelectorError::Empty);
        }
        if expression == "*" {
            return Ok(Self::Response);
        }
        if let Some(name) = expression.strip_prefix('^') {
            let param = descriptor
                .parameter(name)
                .ok_or_else(|| SelectorError::UnknownParameter {
                    parameter: name.to_string(),
                    command: descriptor.command.clone(),
                })?;
            return Ok(Self::Parameter(param.name.clone()));
        }

        descriptor
            .response_member(expression)
            .map(|member| Self::Field(member.to_string()))
            .ok_or_else(|| SelectorError::UnknownField {
                field: expression.to_string(),
                command: descriptor.command.clone(),
                available: if descriptor.response_members.is_empty() {
                    "none".to_string()
                } else {
                    descriptor.response_members.join(", ")
                },
            })
    }

    /// Project one response into the values to emit.
    ///
    /// Array results are enumerated so each element is emitted on its own.
    pub fn project(&self, response: &Value, bound: &BoundParameters) -> Vec<Value> {
        let selected = match self {
            Self::Nothing => return Vec::new(),
            Self::Response => return vec![response.clone()],
            Self::Field(member) => field(response, member),
            Self::Parameter(name) => bound.value(name).cloned(),
        };

        match selected {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => vec![other],
        }
    }
}

fn field(response: &Value, member: &str) -> Option<Value> {
    response.as_object().and_then(|object| {
        object
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(member))
            .map(|(_, value)| value.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::ParameterBindings;
    use crate::testing::descriptor;
    use serde_json::json;

    fn options(select: Option<&str>, pass_thru: bool) -> InvocationOptions {
        InvocationOptions {
            select: select.map(str::to_string),
            pass_thru,
            ..InvocationOptions::default()
        }
    }

    #[test]
    fn test_default_selectors() {
        assert_eq!(
            Selector::resolve(&descriptor("DescribeLogGroups"), &options(None, false)).unwrap(),
            Selector::Field("logGroups".to_string())
        );
        assert_eq!(
            Selector::resolve(&descriptor("TagLogGroup"), &options(None, false)).unwrap(),
            Selector::Nothing
        );
        assert_eq!(
            Selector::resolve(&descriptor("GetTransformer"), &options(None, false)).unwrap(),
            Selector::Response
        );
    }

    #[test]
    fn test_explicit_selectors() {
        let d = descriptor("DescribeLogGroups");
        assert_eq!(
            Selector::resolve(&d, &options(Some("*"), false)).unwrap(),
            Selector::Response
        );
        assert_eq!(
            Selector::resolve(&d, &options(Some("NextToken"), false)).unwrap(),
            Selector::Field("nextToken".to_string())
        );
        assert_eq!(
            Selector::resolve(&d, &options(Some("^logGroupNamePrefix"), false)).unwrap(),
            Selector::Parameter("LogGroupNamePrefix".to_string())
        );
    }

    #[test]
    fn test_pass_thru_and_select_conflict() {
        let d = descriptor("TagLogGroup");
        assert_eq!(
            Selector::resolve(&d, &options(Some("*"), true)).unwrap_err(),
            SelectorError::PassThruConflict
        );
        assert_eq!(
            Selector::resolve(&d, &options(None, true)).unwrap(),
            Selector::Parameter("LogGroupName".to_string())
        );
    }

    #[test]
    fn test_pass_thru_unsupported() {
        let err = Selector::resolve(&descriptor("DescribeLogGroups"), &options(None, true))
            .unwrap_err();
        assert!(matches!(err, SelectorError::PassThruUnsupported { .. }));
    }

    #[test]
    fn test_unknown_field_and_parameter() {
        let d = descriptor("DescribeLogGroups");
        assert!(matches!(
            Selector::resolve(&d, &options(Some("Nope"), false)).unwrap_err(),
            SelectorError::UnknownField { .. }
        ));
        assert!(matches!(
            Selector::resolve(&d, &options(Some("^Nope"), false)).unwrap_err(),
            SelectorError::UnknownParameter { .. }
        ));
        assert_eq!(
            Selector::resolve(&d, &options(Some("  "), false)).unwrap_err(),
            SelectorError::Empty
        );
    }

    #[test]
    fn test_project() {
        let response = json!({"logGroups": [{"logGroupName": "a"}, {"logGroupName": "b"}], "nextToken": "t"});
        let bound = BoundParameters::default();

        assert_eq!(Selector::Response.project(&response, &bound), vec![response.clone()]);
        assert_eq!(
            Selector::Field("logGroups".to_string()).project(&response, &bound),
            vec![json!({"logGroupName": "a"}), json!({"logGroupName": "b"})]
        );
        assert_eq!(
            Selector::Field("nextToken".to_string()).project(&response, &bound),
            vec![json!("t")]
        );
        assert!(Selector::Nothing.project(&response, &bound).is_empty());
        assert!(Selector::Field("missing".to_string())
            .project(&response, &bound)
            .is_empty());
    }

    #[test]
    fn test_project_parameter() {
        let d = descriptor("TagLogGroup");
        let mut bindings = ParameterBindings::new();
        bindings.bind_text("LogGroupName", ["g1"]);
        let bound = bindings.resolve(&d).unwrap();

        let out = Selector::Parameter("LogGroupName".to_string()).project(&json!({}), &bound);
        assert_eq!(out, vec![json!("g1")]);
    }
}
