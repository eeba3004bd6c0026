//! Coercion of untyped arguments into typed component parameters.

use crate::component::ComponentDescriptor;
use crate::error::RenderError;
use crate::value::{Args, ParamKind, ParamValue, Parameters, RawValue};

/// Map an argument bag onto a component's declared parameters.
///
/// Keys without a matching parameter are dropped. A value that cannot be
/// converted to the parameter's kind fails the whole coercion.
pub fn coerce(descriptor: &ComponentDescriptor, args: &Args) -> Result<Parameters, RenderError> {
    let mut params = Parameters::new();

    for (key, raw) in args {
        let Some(param) = descriptor.param(key) else {
            tracing::trace!(
                "Ignoring unknown argument {} for {}",
                key,
                descriptor.simple_name()
            );
            continue;
        };

        let value = convert(raw, param.kind).ok_or_else(|| RenderError::ArgumentConversion {
            component: descriptor.qualified_name().to_string(),
            param: key.clone(),
            target: param.kind,
            value: raw.to_string(),
        })?;

        params.insert(param.name, value);
    }

    Ok(params)
}

/// Convert a raw value to the given kind, or `None` if the pair is unsupported.
pub fn convert(raw: &RawValue, kind: ParamKind) -> Option<ParamValue> {
    match (kind, raw) {
        (ParamKind::String, RawValue::String(s)) => Some(ParamValue::String(s.clone())),
        (ParamKind::String, RawValue::Integer(n)) => Some(ParamValue::String(n.to_string())),
        (ParamKind::String, RawValue::Float(x)) => Some(ParamValue::String(x.to_string())),
        (ParamKind::String, RawValue::Bool(b)) => Some(ParamValue::String(b.to_string())),

        (ParamKind::Integer, RawValue::Integer(n)) => Some(ParamValue::Integer(*n)),
        (ParamKind::Integer, RawValue::Float(x)) => float_to_i64(*x).map(ParamValue::Integer),
        (ParamKind::Integer, RawValue::String(s)) => {
            s.trim().parse::<i64>().ok().map(ParamValue::Integer)
        }

        (ParamKind::Float, RawValue::Float(x)) => Some(ParamValue::Float(*x)),
        (ParamKind::Float, RawValue::Integer(n)) => Some(ParamValue::Float(*n as f64)),
        (ParamKind::Float, RawValue::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .map(ParamValue::Float),

        (ParamKind::Boolean, RawValue::Bool(b)) => Some(ParamValue::Boolean(*b)),
        (ParamKind::Boolean, RawValue::Integer(0)) => Some(ParamValue::Boolean(false)),
        (ParamKind::Boolean, RawValue::Integer(1)) => Some(ParamValue::Boolean(true)),
        (ParamKind::Boolean, RawValue::String(s)) => parse_bool(s).map(ParamValue::Boolean),

        (ParamKind::Enum(variants), RawValue::String(s)) => {
            let wanted = s.trim();
            variants
                .iter()
                .copied()
                .find(|v| v.eq_ignore_ascii_case(wanted))
                .map(ParamValue::Enum)
        }

        _ => None,
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn float_to_i64(x: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    if x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 {
        Some(x as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::{Create, Index};
    use crate::component::ComponentType;
    use pretty_assertions::assert_eq;

    fn args(pairs: &[(&str, RawValue)]) -> Args {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn converts_string_to_boolean_parameter() {
        let descriptor = ComponentDescriptor::of::<Index>();
        let params = coerce(&descriptor, &args(&[("LazyLoad", "false".into())])).unwrap();

        assert_eq!(params.get("LazyLoad"), Some(&ParamValue::Boolean(false)));
    }

    #[test]
    fn drops_unknown_keys_silently() {
        let descriptor = ComponentDescriptor::of::<Index>();
        let params = coerce(
            &descriptor,
            &args(&[("LazyLoad", true.into()), ("Unknown", "x".into())]),
        )
        .unwrap();

        assert_eq!(params.len(), 1);
        assert!(!params.contains("Unknown"));
    }

    #[test]
    fn key_matching_is_case_sensitive() {
        let descriptor = ComponentDescriptor::of::<Index>();
        let params = coerce(&descriptor, &args(&[("lazyload", "false".into())])).unwrap();

        assert!(params.is_empty());
    }

    #[test]
    fn conversion_failure_names_parameter_and_target() {
        let descriptor = ComponentDescriptor::of::<Index>();
        let err = coerce(&descriptor, &args(&[("Columns", "many".into())])).unwrap_err();

        match &err {
            RenderError::ArgumentConversion {
                component,
                param,
                target,
                ..
            } => {
                assert_eq!(component, Index::QUALIFIED_NAME);
                assert_eq!(param, "Columns");
                assert_eq!(*target, ParamKind::Integer);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("Columns"));
        assert!(err.to_string().contains("integer"));
    }

    #[test]
    fn enum_values_match_case_insensitively() {
        let descriptor = ComponentDescriptor::of::<Create>();
        let params = coerce(&descriptor, &args(&[("Size", "portrait".into())])).unwrap();

        assert_eq!(params.get("Size"), Some(&ParamValue::Enum("Portrait")));

        let err = coerce(&descriptor, &args(&[("Size", "Huge".into())])).unwrap_err();
        assert!(matches!(err, RenderError::ArgumentConversion { .. }));
    }

    #[test]
    fn numeric_conversions() {
        assert_eq!(
            convert(&RawValue::Float(3.0), ParamKind::Integer),
            Some(ParamValue::Integer(3))
        );
        assert_eq!(convert(&RawValue::Float(3.5), ParamKind::Integer), None);
        assert_eq!(convert(&RawValue::Float(f64::NAN), ParamKind::Integer), None);
        assert_eq!(
            convert(&RawValue::String(" 42 ".into()), ParamKind::Integer),
            Some(ParamValue::Integer(42))
        );
        assert_eq!(
            convert(&RawValue::Integer(2), ParamKind::Float),
            Some(ParamValue::Float(2.0))
        );
        assert_eq!(convert(&RawValue::String("inf".into()), ParamKind::Float), None);
    }

    #[test]
    fn boolean_conversions() {
        assert_eq!(
            convert(&RawValue::String("TRUE".into()), ParamKind::Boolean),
            Some(ParamValue::Boolean(true))
        );
        assert_eq!(
            convert(&RawValue::Integer(0), ParamKind::Boolean),
            Some(ParamValue::Boolean(false))
        );
        assert_eq!(convert(&RawValue::Integer(2), ParamKind::Boolean), None);
        assert_eq!(convert(&RawValue::String("yes".into()), ParamKind::Boolean), None);
    }

    #[test]
    fn scalars_convert_to_strings() {
        assert_eq!(
            convert(&RawValue::Integer(7), ParamKind::String),
            Some(ParamValue::String("7".to_string()))
        );
        assert_eq!(
            convert(&RawValue::Bool(false), ParamKind::String),
            Some(ParamValue::String("false".to_string()))
        );
    }

    #[test]
    fn rejects_null_and_fragments() {
        assert_eq!(convert(&RawValue::Null, ParamKind::String), None);
        assert_eq!(
            convert(&RawValue::String("<b>x</b>".into()), ParamKind::Fragment),
            None
        );
    }
}
