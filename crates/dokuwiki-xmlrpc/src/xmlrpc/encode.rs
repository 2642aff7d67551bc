//! Request serialisation.

use std::fmt::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use quick_xml::escape::escape;

use crate::error::EncodeError;

use super::value::Value;

/// Render a `methodCall` document for `method` with positional `params`.
///
/// Integers outside the 32-bit range are sent as `<i8>`. Fails if a
/// parameter has no XML-RPC representation (NaN or infinite doubles).
pub fn method_call(method: &str, params: &[Value]) -> Result<String, EncodeError> {
    let mut xml = String::with_capacity(128);
    xml.push_str(r#"<?xml version="1.0"?>"#);
    xml.push_str("<methodCall><methodName>");
    xml.push_str(&escape(method));
    xml.push_str("</methodName><params>");
    for param in params {
        xml.push_str("<param>");
        write_value(&mut xml, param)?;
        xml.push_str("</param>");
    }
    xml.push_str("</params></methodCall>");
    Ok(xml)
}

fn write_value(xml: &mut String, value: &Value) -> Result<(), EncodeError> {
    xml.push_str("<value>");
    match value {
        // Writing to a String cannot fail
        Value::Int(i) => match i32::try_from(*i) {
            Ok(i) => {
                let _ = write!(xml, "<int>{i}</int>");
            }
            Err(_) => {
                let _ = write!(xml, "<i8>{i}</i8>");
            }
        },
        Value::Boolean(b) => {
            xml.push_str(if *b { "<boolean>1</boolean>" } else { "<boolean>0</boolean>" });
        }
        Value::String(s) => {
            xml.push_str("<string>");
            xml.push_str(&escape(s.as_str()));
            xml.push_str("</string>");
        }
        Value::Double(d) => {
            if !d.is_finite() {
                return Err(EncodeError::new(format!("<double> cannot carry {d}")));
            }
            let _ = write!(xml, "<double>{d}</double>");
        }
        Value::DateTime(s) => {
            xml.push_str("<dateTime.iso8601>");
            xml.push_str(&escape(s.as_str()));
            xml.push_str("</dateTime.iso8601>");
        }
        Value::Base64(bytes) => {
            xml.push_str("<base64>");
            xml.push_str(&STANDARD.encode(bytes));
            xml.push_str("</base64>");
        }
        Value::Struct(members) => {
            xml.push_str("<struct>");
            for (name, member) in members {
                xml.push_str("<member><name>");
                xml.push_str(&escape(name.as_str()));
                xml.push_str("</name>");
                write_value(xml, member)?;
                xml.push_str("</member>");
            }
            xml.push_str("</struct>");
        }
        Value::Array(items) => {
            xml.push_str("<array><data>");
            for item in items {
                write_value(xml, item)?;
            }
            xml.push_str("</data></array>");
        }
        Value::Nil => xml.push_str("<nil/>"),
    }
    xml.push_str("</value>");
    Ok(())
}
