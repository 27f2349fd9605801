use crate::models::{Resource, ResourceSize};
use common::{Error, Result};
use serde_json::Value;
use tracing::{debug, warn};

const KB: f64 = 1024.0;
const MB: f64 = KB * 1024.0;
const GB: f64 = MB * 1024.0;
const TB: f64 = GB * 1024.0;

/// Byte size of a resource. A usable direct `size` wins; otherwise the
/// `resource_size` description is converted. Anything unusable is logged and
/// counts as zero.
pub fn byte_size(resource: &Resource) -> u64 {
    if let Some(size) = resource.size.as_ref().and_then(direct_size) {
        return size;
    }

    match resource.resource_size() {
        None => {
            debug!(resource_id = %resource.id, "Resource has no size, using 0");
            0
        }
        Some(parsed) => match parsed.and_then(|size| described_size(&size)) {
            Ok(0) => {
                debug!(resource_id = %resource.id, "Resource size has no value, using 0");
                0
            }
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(
                    resource_id = %resource.id,
                    resource_size = ?resource.resource_size,
                    error = %e,
                    "Failed to determine resource size, using 0"
                );
                0
            }
        },
    }
}

fn direct_size(value: &Value) -> Option<u64> {
    let bytes = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (bytes.is_finite() && bytes > 0.0).then(|| bytes.round() as u64)
}

fn described_size(size: &ResourceSize) -> Result<u64> {
    let value = match &size.size_value {
        None | Some(Value::Null) => return Ok(0),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::InvalidInput(format!("size_value '{}' is not a number", s)))?,
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| Error::InvalidInput(format!("size_value {} out of range", n)))?,
        Some(other) => {
            return Err(Error::InvalidInput(format!(
                "size_value {} is not a number",
                other
            )));
        }
    };

    let units = size.size_units.as_deref().unwrap_or("KB");
    let multiplier = match units.to_uppercase().as_str() {
        "KB" => KB,
        "MB" => MB,
        "GB" => GB,
        "TB" => TB,
        _ => return Err(Error::InvalidInput(format!("unknown size unit '{}'", units))),
    };

    let bytes = value * multiplier;
    if !bytes.is_finite() || bytes < 0.0 {
        return Err(Error::InvalidInput(format!("size {} is not a byte count", bytes)));
    }
    Ok(bytes.round() as u64)
}
