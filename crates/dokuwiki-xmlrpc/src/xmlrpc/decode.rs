//! Response parsing.
//!
//! The body is first flattened into open/close/text tokens with quick-xml,
//! then walked by a small recursive-descent parser. Whitespace-only text
//! between structural elements is ignored; text inside `<string>` and
//! untyped `<value>` elements is kept verbatim.

use std::collections::BTreeMap;
use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{DecodeError, Fault};

use super::value::Value;

/// A decoded `methodResponse`.
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    Success(Value),
    Fault(Fault),
}

/// Parse a `methodResponse` document.
pub fn parse_response(xml: &str) -> Result<Response, DecodeError> {
    let tokens = tokenize(xml)?;
    let mut parser = Parser { tokens, pos: 0 };

    if parser.at_end() {
        return Err(DecodeError::new("empty response body"));
    }

    parser.open("methodResponse")?;
    parser.skip_ws();
    let response = match parser.peek() {
        Some(Token::Open(name)) if name == "params" => {
            parser.open("params")?;
            parser.skip_ws();
            let value = if parser.peek_open("param") {
                parser.open("param")?;
                let value = parser.value()?;
                parser.close("param")?;
                value
            } else {
                Value::Nil
            };
            parser.close("params")?;
            Response::Success(value)
        }
        Some(Token::Open(name)) if name == "fault" => {
            parser.open("fault")?;
            let value = parser.value()?;
            parser.close("fault")?;
            Response::Fault(fault_from_value(value)?)
        }
        other => return Err(unexpected("<params> or <fault>", other)),
    };
    parser.close("methodResponse")?;
    parser.skip_ws();
    if !parser.at_end() {
        return Err(DecodeError::new("trailing content after </methodResponse>"));
    }

    Ok(response)
}

fn fault_from_value(value: Value) -> Result<Fault, DecodeError> {
    let code = match value.get("faultCode") {
        Some(Value::Int(code)) => *code,
        Some(Value::String(code)) => code
            .trim()
            .parse()
            .map_err(|_| DecodeError::new(format!("non-numeric faultCode '{code}'")))?,
        _ => return Err(DecodeError::new("fault without faultCode")),
    };
    let message = value
        .get("faultString")
        .and_then(Value::as_str)
        .ok_or_else(|| DecodeError::new("fault without faultString"))?;

    Ok(Fault::new(code, message))
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Open(String),
    Close(String),
    Text(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Open(name) => write!(f, "<{name}>"),
            Token::Close(name) => write!(f, "</{name}>"),
            Token::Text(text) => {
                let snippet: String = text.trim().chars().take(40).collect();
                write!(f, "text '{snippet}'")
            }
        }
    }
}

fn malformed(err: impl fmt::Display) -> DecodeError {
    DecodeError::new(format!("malformed XML: {err}"))
}

fn tag_name(raw: &[u8]) -> Result<String, DecodeError> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(malformed)
}

fn push_text(tokens: &mut Vec<Token>, text: &str) {
    if let Some(Token::Text(existing)) = tokens.last_mut() {
        existing.push_str(text);
    } else {
        tokens.push(Token::Text(text.to_string()));
    }
}

fn tokenize(xml: &str) -> Result<Vec<Token>, DecodeError> {
    let mut reader = Reader::from_str(xml);
    let mut tokens = Vec::new();

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => tokens.push(Token::Open(tag_name(e.name().as_ref())?)),
            Event::End(e) => tokens.push(Token::Close(tag_name(e.name().as_ref())?)),
            Event::Empty(e) => {
                let name = tag_name(e.name().as_ref())?;
                tokens.push(Token::Open(name.clone()));
                tokens.push(Token::Close(name));
            }
            Event::Text(e) => {
                let text = e.unescape().map_err(malformed)?;
                push_text(&mut tokens, &text);
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(&e).map_err(malformed)?;
                push_text(&mut tokens, text);
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctypes
            _ => {}
        }
    }

    Ok(tokens)
}

fn unexpected(expected: &str, found: Option<&Token>) -> DecodeError {
    match found {
        Some(token) => DecodeError::new(format!("expected {expected}, found {token}")),
        None => DecodeError::new(format!("expected {expected}, found end of document")),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn peek_open(&self, name: &str) -> bool {
        matches!(self.peek(), Some(Token::Open(n)) if n == name)
    }

    fn at_end(&self) -> bool {
        self.skip_ws_pos() >= self.tokens.len()
    }

    fn skip_ws_pos(&self) -> usize {
        let mut pos = self.pos;
        while let Some(Token::Text(text)) = self.tokens.get(pos) {
            if !text.trim().is_empty() {
                break;
            }
            pos += 1;
        }
        pos
    }

    fn skip_ws(&mut self) {
        self.pos = self.skip_ws_pos();
    }

    fn open(&mut self, name: &str) -> Result<(), DecodeError> {
        self.skip_ws();
        match self.peek() {
            Some(Token::Open(n)) if n == name => {
                self.pos += 1;
                Ok(())
            }
            other => Err(unexpected(&format!("<{name}>"), other)),
        }
    }

    fn close(&mut self, name: &str) -> Result<(), DecodeError> {
        self.skip_ws();
        match self.peek() {
            Some(Token::Close(n)) if n == name => {
                self.pos += 1;
                Ok(())
            }
            other => Err(unexpected(&format!("</{name}>"), other)),
        }
    }

    /// Text content up to the closing tag, or empty if there is none.
    fn text(&mut self) -> String {
        match self.peek() {
            Some(Token::Text(text)) => {
                let text = text.clone();
                self.pos += 1;
                text
            }
            _ => String::new(),
        }
    }

    fn value(&mut self) -> Result<Value, DecodeError> {
        self.open("value")?;

        // Untyped content is a string, including an empty <value></value>.
        match (self.peek(), self.peek_at(1)) {
            (Some(Token::Close(n)), _) if n == "value" => {
                self.pos += 1;
                return Ok(Value::String(String::new()));
            }
            (Some(Token::Text(text)), Some(Token::Close(n))) if n == "value" => {
                let value = Value::String(text.clone());
                self.pos += 2;
                return Ok(value);
            }
            _ => {}
        }

        self.skip_ws();
        let kind = match self.peek() {
            Some(Token::Open(kind)) => kind.clone(),
            other => return Err(unexpected("a typed value", other)),
        };
        self.pos += 1;

        let value = match kind.as_str() {
            "int" | "i4" | "i8" => {
                let text = self.text();
                text.trim()
                    .parse()
                    .map(Value::Int)
                    .map_err(|_| DecodeError::new(format!("invalid <{kind}> '{text}'")))?
            }
            "boolean" => match self.text().trim() {
                "1" | "true" => Value::Boolean(true),
                "0" | "false" => Value::Boolean(false),
                other => return Err(DecodeError::new(format!("invalid <boolean> '{other}'"))),
            },
            "string" => Value::String(self.text()),
            "double" => {
                let text = self.text();
                text.trim()
                    .parse()
                    .map(Value::Double)
                    .map_err(|_| DecodeError::new(format!("invalid <double> '{text}'")))?
            }
            "dateTime.iso8601" => Value::DateTime(self.text().trim().to_string()),
            "base64" => {
                let text: String = self
                    .text()
                    .chars()
                    .filter(|c| !c.is_ascii_whitespace())
                    .collect();
                STANDARD
                    .decode(text.as_bytes())
                    .map(Value::Base64)
                    .map_err(|e| DecodeError::new(format!("invalid <base64>: {e}")))?
            }
            "struct" => self.struct_members()?,
            "array" => self.array_items()?,
            "nil" => Value::Nil,
            other => return Err(DecodeError::new(format!("unknown value type <{other}>"))),
        };

        self.close(&kind)?;
        self.close("value")?;
        Ok(value)
    }

    fn struct_members(&mut self) -> Result<Value, DecodeError> {
        let mut members = BTreeMap::new();
        loop {
            self.skip_ws();
            if !self.peek_open("member") {
                break;
            }
            self.open("member")?;
            self.open("name")?;
            let name = self.text();
            self.close("name")?;
            let value = self.value()?;
            self.close("member")?;
            members.insert(name, value);
        }
        Ok(Value::Struct(members))
    }

    fn array_items(&mut self) -> Result<Value, DecodeError> {
        let mut items = Vec::new();
        self.open("data")?;
        loop {
            self.skip_ws();
            if !self.peek_open("value") {
                break;
            }
            items.push(self.value()?);
        }
        self.close("data")?;
        Ok(Value::Array(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(body: &str) -> Value {
        let xml = format!(
            "<?xml version=\"1.0\"?>\n<methodResponse>\n  <params>\n    <param>\n      {body}\n    </param>\n  </params>\n</methodResponse>\n"
        );
        match parse_response(&xml).unwrap() {
            Response::Success(value) => value,
            Response::Fault(fault) => panic!("unexpected fault {fault}"),
        }
    }

    #[test]
    fn scalar_types() {
        assert_eq!(success("<value><int>42</int></value>"), Value::Int(42));
        assert_eq!(success("<value><i4>-7</i4></value>"), Value::Int(-7));
        assert_eq!(success("<value><boolean>1</boolean></value>"), Value::Boolean(true));
        assert_eq!(success("<value><double>1.5</double></value>"), Value::Double(1.5));
        assert_eq!(
            success("<value><dateTime.iso8601>20240101T10:00:00</dateTime.iso8601></value>"),
            Value::DateTime("20240101T10:00:00".into())
        );
        assert_eq!(success("<value><nil/></value>"), Value::Nil);
    }

    #[test]
    fn strings_keep_whitespace_and_entities() {
        assert_eq!(
            success("<value><string>  ====== Start ======\n&lt;b&gt; &amp; co</string></value>"),
            Value::String("  ====== Start ======\n<b> & co".into())
        );
        assert_eq!(success("<value>untyped</value>"), Value::String("untyped".into()));
        assert_eq!(success("<value></value>"), Value::String(String::new()));
        assert_eq!(success("<value><string/></value>"), Value::String(String::new()));
        assert_eq!(
            success("<value><string><![CDATA[a<b]]></string></value>"),
            Value::String("a<b".into())
        );
    }

    #[test]
    fn base64_is_binary_and_whitespace_tolerant() {
        assert_eq!(
            success("<value><base64>\n  AP9k\n  YXRh\n</base64></value>"),
            Value::Base64(b"\x00\xffdata".to_vec())
        );
    }

    #[test]
    fn nested_struct_and_array() {
        let value = success(
            "<value><array><data>
               <value><struct>
                 <member><name>id</name><value><string>start</string></value></member>
                 <member><name>rev</name><value><int>1700000000</int></value></member>
               </struct></value>
               <value><string>wiki:syntax</string></value>
             </data></array></value>",
        );
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].get("id"), Some(&Value::from("start")));
        assert_eq!(items[0].get("rev"), Some(&Value::Int(1_700_000_000)));
        assert_eq!(items[1], Value::from("wiki:syntax"));
    }

    #[test]
    fn fault_response() {
        let xml = "<?xml version=\"1.0\"?><methodResponse><fault><value><struct>\
                   <member><name>faultCode</name><value><int>121</int></value></member>\
                   <member><name>faultString</name><value><string>Unknown page</string></value></member>\
                   </struct></value></fault></methodResponse>";
        assert_eq!(
            parse_response(xml).unwrap(),
            Response::Fault(Fault::new(121, "Unknown page"))
        );
    }

    #[test]
    fn plain_text_is_a_decode_error() {
        let err = parse_response("XML-RPC server not enabled.").unwrap_err();
        assert!(err.message().contains("<methodResponse>"), "{err}");
    }

    #[test]
    fn empty_and_broken_documents() {
        assert!(parse_response("").is_err());
        assert!(parse_response("   \n").is_err());
        assert!(parse_response("<methodResponse><params>").is_err());
        assert!(parse_response("<html><body>Not Found</body></html>").is_err());
        assert!(
            parse_response("<methodResponse><params><param><value><int>x</int></value></param></params></methodResponse>")
                .is_err()
        );
    }

    #[test]
    fn mismatched_tags_are_rejected() {
        assert!(
            parse_response("<methodResponse><params></param></methodResponse>").is_err()
        );
    }
}
