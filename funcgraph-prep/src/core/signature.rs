//! Signature extraction from analyzed-function descriptors.
//!
//! Parameter descriptors arrive as the analysis pass's textual rendering,
//! `parameter <name> : <type>`. The layout is validated before any field is
//! read; a descriptor that does not match is reported as a
//! [`DescriptorError`] and never silently reinterpreted.

use crate::errors::DescriptorError;
use crate::model::{
    descriptor::{AnalyzedFunction, ParamDescriptor},
    record::Parameter,
};

const PARAM_KEYWORD: &str = "parameter";
const PARAM_SEPARATOR: &str = ":";

/// Everything the record builder needs from one function's signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSignature {
    pub qualified_name: String,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: String,
    pub signature: String,
    /// Parameter descriptors that could not be parsed. Each still occupies
    /// its slot in `parameters`, with the raw text as type and no name.
    pub malformed: Vec<DescriptorError>,
}

/// Derive name, parameters, return type, key and signature string.
pub fn extract(func: &AnalyzedFunction) -> ExtractedSignature {
    let mut parameters = Vec::with_capacity(func.params.len());
    let mut malformed = Vec::new();

    for p in &func.params {
        match parse_param_descriptor(p) {
            Ok(param) => parameters.push(param),
            Err(err) => {
                let DescriptorError::MalformedParameter { raw, .. } = &err;
                parameters.push(Parameter {
                    ty: raw.clone(),
                    name: String::new(),
                });
                malformed.push(err);
            }
        }
    }

    let signature = format_signature(&func.qualified_name, &parameters);
    ExtractedSignature {
        qualified_name: func.qualified_name.clone(),
        name: func.name.clone(),
        parameters,
        return_type: normalize_return_type(&func.results),
        signature,
        malformed,
    }
}

fn parse_param_descriptor(p: &ParamDescriptor) -> Result<Parameter, DescriptorError> {
    match p {
        ParamDescriptor::Text(raw) => parse_parameter(raw),
        ParamDescriptor::Structured { name, ty } => Ok(Parameter {
            ty: ty.clone(),
            name: name.clone(),
        }),
    }
}

/// Parse `parameter <name> : <type>`.
///
/// Everything after the `:` token is the type, so types containing spaces
/// (`func(a int) error`, `map[string] int`) are kept whole.
pub fn parse_parameter(raw: &str) -> Result<Parameter, DescriptorError> {
    let malformed = |reason| DescriptorError::MalformedParameter {
        raw: raw.to_string(),
        reason,
    };

    let parts: Vec<&str> = raw.splitn(4, ' ').collect();
    if parts.len() < 4 {
        return Err(malformed("expected `parameter <name> : <type>`"));
    }
    if parts[0] != PARAM_KEYWORD {
        return Err(malformed("missing `parameter` keyword"));
    }
    if parts[2] != PARAM_SEPARATOR {
        return Err(malformed("missing `:` separator"));
    }

    let name = parts[1];
    let ty = parts[3].trim();
    if name.is_empty() {
        return Err(malformed("empty parameter name"));
    }
    if ty.is_empty() {
        return Err(malformed("empty parameter type"));
    }

    Ok(Parameter {
        ty: ty.to_string(),
        name: name.to_string(),
    })
}

/// Remove exactly one pair of outer tuple parentheses from a result rendering.
///
/// - `""` and `"()"` (no results) become `""`;
/// - `"(int, error)"` becomes `"int, error"`;
/// - an unwrapped single result such as `"error"` is kept as is;
/// - `"(a) func() (b)"`-style text whose first `(` does not close at the end
///   is not a tuple wrapper and is kept as is.
pub fn normalize_return_type(results: &str) -> String {
    let s = results.trim();
    if wrapped_in_parens(s) {
        s[1..s.len() - 1].trim().to_string()
    } else {
        s.to_string()
    }
}

/// True when `s` starts with `(` whose matching `)` is the last character.
fn wrapped_in_parens(s: &str) -> bool {
    if !(s.starts_with('(') && s.ends_with(')')) {
        return false;
    }
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i == s.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

/// `qualified(T1,T2,...)`: parameter types joined with `,`, no spaces.
pub fn format_signature(qualified_name: &str, params: &[Parameter]) -> String {
    let types: Vec<&str> = params.iter().map(|p| p.ty.as_str()).collect();
    format!("{}({})", qualified_name, types.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn func(params: Vec<ParamDescriptor>, results: &str) -> AnalyzedFunction {
        AnalyzedFunction {
            qualified_name: "example.com/m/pkg.Run".into(),
            name: "Run".into(),
            params,
            results: results.into(),
            ..AnalyzedFunction::default()
        }
    }

    #[test]
    fn parses_simple_parameter() {
        let p = parse_parameter("parameter ctx : context.Context").unwrap();
        assert_eq!(p.name, "ctx");
        assert_eq!(p.ty, "context.Context");
    }

    #[test]
    fn keeps_multi_token_types_whole() {
        let p = parse_parameter("parameter cb : func(a int) error").unwrap();
        assert_eq!(p.name, "cb");
        assert_eq!(p.ty, "func(a int) error");
    }

    #[test]
    fn rejects_unexpected_layouts() {
        for raw in [
            "",
            "ctx context.Context",
            "parameter ctx context.Context",
            "param ctx : int",
            "parameter ctx :",
            "parameter  : int",
        ] {
            assert!(parse_parameter(raw).is_err(), "accepted `{raw}`");
        }
    }

    #[test]
    fn strips_only_outer_tuple_parens() {
        assert_eq!(normalize_return_type("(int, error)"), "int, error");
        assert_eq!(normalize_return_type("(n int, err error)"), "n int, err error");
        assert_eq!(normalize_return_type("(func() (int, error))"), "func() (int, error)");
        assert_eq!(normalize_return_type("(error)"), "error");
        assert_eq!(normalize_return_type("()"), "");
        assert_eq!(normalize_return_type(""), "");
    }

    #[test]
    fn unwrapped_single_result_is_not_truncated() {
        assert_eq!(normalize_return_type("error"), "error");
        assert_eq!(normalize_return_type("func() (int)"), "func() (int)");
        assert_eq!(normalize_return_type("(a) func() (b)"), "(a) func() (b)");
    }

    #[test]
    fn signature_joins_types_without_spaces() {
        let f = func(
            vec![
                ParamDescriptor::Text("parameter a : int".into()),
                ParamDescriptor::Structured {
                    name: "b".into(),
                    ty: "[]string".into(),
                },
            ],
            "(bool)",
        );
        let sig = extract(&f);
        assert_eq!(sig.signature, "example.com/m/pkg.Run(int,[]string)");
        assert_eq!(sig.return_type, "bool");
        assert!(sig.malformed.is_empty());
    }

    #[test]
    fn malformed_parameter_keeps_its_slot() {
        let f = func(
            vec![
                ParamDescriptor::Text("parameter a : int".into()),
                ParamDescriptor::Text("garbage".into()),
                ParamDescriptor::Text("parameter b : string".into()),
            ],
            "",
        );
        let sig = extract(&f);
        assert_eq!(sig.malformed.len(), 1);
        assert_eq!(sig.parameters.len(), 3);
        assert_eq!(
            sig.parameters[1],
            Parameter {
                ty: "garbage".into(),
                name: String::new(),
            }
        );
        assert_eq!(sig.parameters[2].name, "b");
        assert_eq!(sig.signature, "example.com/m/pkg.Run(int,garbage,string)");
    }

    #[test]
    fn no_params_gives_empty_parens() {
        let sig = extract(&func(vec![], "()"));
        assert_eq!(sig.signature, "example.com/m/pkg.Run()");
        assert_eq!(sig.return_type, "");
    }
}
