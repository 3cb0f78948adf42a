// YAML front-matter editing for Markdown documents.
//
// Only a block that starts on the very first line counts as front-matter.
// Editing re-serializes the mapping, so comments inside the block are not
// preserved; key order and the document body are.

use serde_yaml::{Mapping, Value};

const FENCE: &str = "---";

#[derive(Debug, PartialEq, Eq)]
struct Split<'a> {
    /// Raw YAML between the fences, if the document has a block.
    yaml: Option<&'a str>,
    /// Everything after the closing fence line.
    body: &'a str,
}

fn is_fence(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']) == FENCE
}

fn split(text: &str) -> Result<Split<'_>, String> {
    let mut lines = text.split_inclusive('\n');
    match lines.next() {
        Some(first) if is_fence(first) => {}
        _ => return Ok(Split { yaml: None, body: text }),
    }

    let yaml_start = text.split_inclusive('\n').next().map_or(0, str::len);
    let mut offset = yaml_start;
    for line in lines {
        if is_fence(line) {
            return Ok(Split {
                yaml: Some(&text[yaml_start..offset]),
                body: &text[offset + line.len()..],
            });
        }
        offset += line.len();
    }
    Err("unterminated front-matter block: expected closing '---'".to_string())
}

fn parse_mapping(yaml: &str) -> Result<Mapping, String> {
    if yaml.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_yaml::from_str::<Value>(yaml).map_err(|err| err.to_string())? {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err("front-matter must be a YAML mapping".to_string()),
    }
}

/// Return `text` with `key` set to `value` in its front-matter, creating the
/// block when the document has none. An existing key keeps its position.
pub fn set_field(text: &str, key: &str, value: Value) -> Result<String, String> {
    let parts = split(text)?;
    let mut mapping = match parts.yaml {
        Some(yaml) => parse_mapping(yaml)?,
        None => Mapping::new(),
    };
    mapping.insert(Value::String(key.to_string()), value);

    let yaml = serde_yaml::to_string(&mapping).map_err(|err| err.to_string())?;
    Ok(format!("{FENCE}\n{yaml}{FENCE}\n{}", parts.body))
}
