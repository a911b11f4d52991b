use mongodb::bson::{Bson, Document};
use serde_json::{Map, Number, Value};

/// Renders a stored document the way the web client expects it: ids as hex
/// strings, datetimes as RFC 3339, numbers as plain JSON numbers.
pub fn document_to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect::<Map<String, Value>>(),
    )
}

pub fn documents_to_json(docs: Vec<Document>) -> Value {
    Value::Array(docs.into_iter().map(document_to_json).collect())
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::String(s) => Value::String(s),
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(n) => Value::Number(n.into()),
        Bson::Int64(n) => Value::Number(n.into()),
        Bson::Double(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(doc) => document_to_json(doc),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or_else(|_| Value::Number(dt.timestamp_millis().into())),
        other => other.into_relaxed_extjson(),
    }
}

/// Converts a JSON request body into a BSON document ready for insertion.
pub fn json_to_document(body: Map<String, Value>) -> Result<Document, mongodb::bson::ser::Error> {
    mongodb::bson::to_document(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId, DateTime};

    #[test]
    fn object_ids_render_as_hex() {
        let oid = ObjectId::new();
        let json = document_to_json(doc! { "_id": oid, "name": "Laptop", "quantity": 3_i64 });

        assert_eq!(json["_id"], Value::String(oid.to_hex()));
        assert_eq!(json["name"], "Laptop");
        assert_eq!(json["quantity"], 3);
    }

    #[test]
    fn nested_values_are_converted() {
        let oid = ObjectId::new();
        let when = DateTime::from_millis(0);
        let json = document_to_json(doc! {
            "items": [ { "ref": oid }, 1.5, Bson::Null ],
            "at": when,
        });

        assert_eq!(json["items"][0]["ref"], Value::String(oid.to_hex()));
        assert_eq!(json["items"][1], 1.5);
        assert!(json["items"][2].is_null());
        assert_eq!(json["at"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn request_body_becomes_document() {
        let body = serde_json::json!({ "name": "Chair", "quantity": 4, "type": "returnable" });
        let Value::Object(map) = body else { unreachable!() };

        let doc = json_to_document(map).unwrap();
        assert_eq!(doc.get_str("name").unwrap(), "Chair");
        assert_eq!(doc.get_str("type").unwrap(), "returnable");
        assert!(doc.contains_key("quantity"));
    }
}
