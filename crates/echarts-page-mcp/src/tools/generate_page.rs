//! Tool: generate_echarts_page — render an ECharts option into a hosted
//! HTML page and return its public URL.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde_json::Value;

use echarts_page::render::{load_template, render};
use echarts_page::store::ArtifactStore;
use echarts_page::types::{ChartError, ChartRequest, ChartResult, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use echarts_page::url::resolve_public_url;

use crate::config::Config;

/// Tool name as advertised to clients.
pub const NAME: &str = "generate_echarts_page";

pub fn definition() -> Tool {
    Tool::new(
        NAME,
        "Generate a standalone HTML chart page from an ECharts JSON option and return its public URL",
        Arc::new(input_schema()),
    )
}

fn input_schema() -> JsonObject {
    let schema = serde_json::json!({
        "type": "object",
        "properties": {
            "inputSchema": {
                "type": "object",
                "description": "The ECharts option object to render"
            },
            "title": {
                "type": "string",
                "description": "Page and chart title"
            },
            "width": {
                "type": "number",
                "description": "Chart width in pixels",
                "default": DEFAULT_WIDTH
            },
            "height": {
                "type": "number",
                "description": "Chart height in pixels",
                "default": DEFAULT_HEIGHT
            }
        },
        "required": ["inputSchema", "title"]
    });
    match schema {
        // json! with an object literal always takes this branch.
        Value::Object(map) => map,
        _ => JsonObject::new(),
    }
}

/// Convert the untyped argument map into a typed request.
///
/// Total over its input: every malformed shape maps to a specific
/// [`ChartError::Argument`], and width/height coercion failures fall back
/// to the defaults rather than failing the call.
pub fn parse_request(args: &JsonObject) -> ChartResult<ChartRequest> {
    let config = match args.get("inputSchema") {
        Some(value @ Value::Object(_)) => value.clone(),
        _ => {
            return Err(ChartError::Argument(
                "inputSchema must be an object".to_string(),
            ))
        }
    };

    let title = match args.get("title").and_then(Value::as_str) {
        Some(title) => title.to_string(),
        None => return Err(ChartError::Argument("title must be a string".to_string())),
    };

    Ok(ChartRequest {
        title,
        config,
        width: dimension_arg(args, "width", DEFAULT_WIDTH),
        height: dimension_arg(args, "height", DEFAULT_HEIGHT),
    })
}

/// Coerce an optional numeric argument to a positive pixel count. Anything
/// that does not coerce is treated as absent.
fn dimension_arg(args: &JsonObject, key: &str, default: u32) -> u32 {
    let Some(value) = args.get(key) else {
        return default;
    };

    #[allow(clippy::cast_possible_truncation)]
    let coerced = value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64));

    match coerced {
        Some(n) if n > 0 => u32::try_from(n).unwrap_or(default),
        _ => default,
    }
}

/// Run the full pipeline: validate, render, persist, resolve the URL.
///
/// Every failure is recoverable and reported to the caller; once started,
/// the pipeline runs to completion or failure without cancellation.
pub fn execute(args: &JsonObject, config: &Config) -> ChartResult<String> {
    let request = parse_request(args)?;
    let page = render(&request, &load_template())?;

    let store = ArtifactStore::new(&config.static_dir);
    let artifact = store.persist(&page)?;
    tracing::info!(file = %artifact.file_name, title = %request.title, "chart page generated");

    Ok(resolve_public_url(&config.public_url, &artifact.file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => panic!("test arguments must be an object"),
        }
    }

    #[test]
    fn test_parse_minimal_request() {
        let request =
            parse_request(&args(json!({"inputSchema": {"series": []}, "title": "Test"}))).unwrap();
        assert_eq!(request.title, "Test");
        assert_eq!(request.config, json!({"series": []}));
        assert_eq!(request.width, DEFAULT_WIDTH);
        assert_eq!(request.height, DEFAULT_HEIGHT);
    }

    #[test]
    fn test_missing_input_schema() {
        let err = parse_request(&args(json!({"title": "Test"}))).unwrap_err();
        assert!(matches!(err, ChartError::Argument(_)));
        assert!(err.to_string().contains("inputSchema must be an object"));
    }

    #[test]
    fn test_non_object_input_schema() {
        let err = parse_request(&args(json!({"inputSchema": [1, 2], "title": "T"}))).unwrap_err();
        assert!(err.to_string().contains("inputSchema must be an object"));
    }

    #[test]
    fn test_missing_title() {
        let err = parse_request(&args(json!({"inputSchema": {}}))).unwrap_err();
        assert!(err.to_string().contains("title must be a string"));
    }

    #[test]
    fn test_non_string_title() {
        let err = parse_request(&args(json!({"inputSchema": {}, "title": 42}))).unwrap_err();
        assert!(err.to_string().contains("title must be a string"));
    }

    #[test]
    fn test_explicit_dimensions() {
        let request = parse_request(&args(
            json!({"inputSchema": {}, "title": "T", "width": 800, "height": 400}),
        ))
        .unwrap();
        assert_eq!(request.width, 800);
        assert_eq!(request.height, 400);
    }

    #[test]
    fn test_fractional_dimension_coerces() {
        let request =
            parse_request(&args(json!({"inputSchema": {}, "title": "T", "width": 800.9}))).unwrap();
        assert_eq!(request.width, 800);
    }

    #[test]
    fn test_bad_dimension_falls_back_to_default() {
        let request = parse_request(&args(
            json!({"inputSchema": {}, "title": "T", "width": "wide", "height": -5}),
        ))
        .unwrap();
        assert_eq!(request.width, DEFAULT_WIDTH);
        assert_eq!(request.height, DEFAULT_HEIGHT);
    }
}
