use serde_json::{json, Map, Value};

/// Conversions between flat JSON records and the Firestore REST document
/// shape, where every field is wrapped in a typed value object
/// (`stringValue`, `integerValue`, `arrayValue`, ...).
///
/// Timestamps travel as RFC 3339 strings in the flat form and as
/// `timestampValue` on the wire, which keeps server-side `orderBy` on
/// date fields working.

/// Encode one flat JSON value as a Firestore typed value.
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                // Firestore integers are string-encoded on the wire
                json!({ "integerValue": i.to_string() })
            } else if let Some(u) = n.as_u64() {
                json!({ "integerValue": u.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => {
            if chrono::DateTime::parse_from_rfc3339(s).is_ok() {
                json!({ "timestampValue": s })
            } else {
                json!({ "stringValue": s })
            }
        }
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => {
            json!({ "mapValue": { "fields": encode_field_map(map) } })
        }
    }
}

/// Decode one Firestore typed value back into flat JSON. Unknown kinds
/// and unparseable integers decode to null.
pub fn decode_value(value: &Value) -> Value {
    if let Some(s) = value.get("stringValue").and_then(Value::as_str) {
        return Value::String(s.to_string());
    }
    if let Some(s) = value.get("timestampValue").and_then(Value::as_str) {
        return Value::String(s.to_string());
    }
    if let Some(s) = value.get("integerValue").and_then(Value::as_str) {
        return s
            .parse::<i64>()
            .map(|i| Value::Number(i.into()))
            .unwrap_or(Value::Null);
    }
    // Some emulators emit integerValue as a bare number
    if let Some(n) = value.get("integerValue").and_then(Value::as_i64) {
        return Value::Number(n.into());
    }
    if let Some(d) = value.get("doubleValue").and_then(Value::as_f64) {
        return serde_json::Number::from_f64(d)
            .map(Value::Number)
            .unwrap_or(Value::Null);
    }
    if let Some(b) = value.get("booleanValue").and_then(Value::as_bool) {
        return Value::Bool(b);
    }
    if value.get("nullValue").is_some() {
        return Value::Null;
    }
    if let Some(array) = value.get("arrayValue") {
        let items = array
            .get("values")
            .and_then(Value::as_array)
            .map(|values| values.iter().map(decode_value).collect())
            .unwrap_or_default();
        return Value::Array(items);
    }
    if let Some(map) = value.get("mapValue") {
        let fields = map
            .get("fields")
            .and_then(Value::as_object)
            .map(|fields| {
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), decode_value(v)))
                    .collect()
            })
            .unwrap_or_default();
        return Value::Object(fields);
    }

    Value::Null
}

fn encode_field_map(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        // Nulls stay out of the document, matching fields that were
        // simply never written
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.clone(), encode_value(v)))
        .collect()
}

/// Wrap a flat JSON object into a Firestore document body.
pub fn encode_document(record: &Value) -> Value {
    let fields = record
        .as_object()
        .map(encode_field_map)
        .unwrap_or_default();
    json!({ "fields": fields })
}

/// Field names present in a flat record, for `updateMask.fieldPaths`.
pub fn field_paths(record: &Value) -> Vec<String> {
    record
        .as_object()
        .map(|map| {
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, _)| k.clone())
                .collect()
        })
        .unwrap_or_default()
}

/// The document id is the last segment of its resource name.
pub fn document_id(document: &Value) -> Option<&str> {
    document
        .get("name")
        .and_then(Value::as_str)
        .and_then(|name| name.rsplit('/').next())
}

/// Flatten a Firestore document into plain JSON, injecting the id from
/// the resource name. Returns `None` when the shape is not a document.
pub fn document_to_json(document: &Value) -> Option<Value> {
    let fields = match document.get("fields") {
        Some(fields) => fields.as_object()?.clone(),
        // A document without fields is legal (all fields deleted)
        None if document.get("name").is_some() => Map::new(),
        None => return None,
    };

    let mut record: Map<String, Value> = fields
        .iter()
        .map(|(k, v)| (k.clone(), decode_value(v)))
        .collect();

    if let Some(id) = document_id(document) {
        record.insert("id".to_string(), Value::String(id.to_string()));
    }

    Some(Value::Object(record))
}
