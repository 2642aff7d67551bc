//! Output formatting helpers.

use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use dokuwiki_xmlrpc::Value;

/// How a command's result is laid out on stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// The value as-is.
    Plain,
    /// One array item per line.
    List,
    /// `key: value` lines; arrays of structs get a blank line between items.
    Dict,
}

/// Print a command result in the requested shape, or as JSON.
pub fn render(value: &Value, shape: Shape, as_json: bool) -> Result<()> {
    if as_json {
        return json_pretty(value);
    }

    if is_empty(value) {
        eprintln!("{}", "No results.".dimmed());
        return Ok(());
    }

    let mut out = io::stdout().lock();
    match shape {
        Shape::Plain => writeln!(out, "{}", scalar(value))?,
        Shape::List => match value {
            Value::Array(items) => {
                for item in items {
                    writeln!(out, "{}", list_item(item))?;
                }
            }
            other => writeln!(out, "{}", scalar(other))?,
        },
        Shape::Dict => match value {
            Value::Array(items) => {
                for item in items {
                    write_members(&mut out, item)?;
                    writeln!(out)?;
                }
            }
            other => write_members(&mut out, other)?,
        },
    }
    Ok(())
}

fn write_members(out: &mut impl Write, value: &Value) -> io::Result<()> {
    match value {
        Value::Struct(members) => {
            for (key, member) in members {
                writeln!(out, "{}: {}", key, scalar(member))?;
            }
            Ok(())
        }
        other => writeln!(out, "{}", scalar(other)),
    }
}

/// Page listings come back as structs; show their id on the line.
fn list_item(value: &Value) -> String {
    match value.get("id").and_then(Value::as_str) {
        Some(id) => id.to_string(),
        None => scalar(value),
    }
}

/// Render a single value on one line.
pub fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) | Value::DateTime(s) => s.clone(),
        Value::Int(i) => i.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Double(d) => d.to_string(),
        Value::Base64(bytes) => format!("<{} bytes>", bytes.len()),
        Value::Nil => String::new(),
        nested => serde_json::to_string(nested).unwrap_or_default(),
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.is_empty(),
        Value::Struct(members) => members.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Nil => true,
        _ => false,
    }
}

/// Print a success message.
pub fn success(msg: &str) {
    eprintln!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars() {
        assert_eq!(scalar(&Value::from("start")), "start");
        assert_eq!(scalar(&Value::Int(255)), "255");
        assert_eq!(scalar(&Value::Boolean(true)), "true");
        assert_eq!(scalar(&Value::binary(vec![0u8; 4])), "<4 bytes>");
        assert_eq!(scalar(&Value::from(vec!["a", "b"])), r#"["a","b"]"#);
    }

    #[test]
    fn list_items_prefer_page_id() {
        let page = Value::structure([("id", Value::from("wiki:syntax")), ("rev", Value::Int(1))]);
        assert_eq!(list_item(&page), "wiki:syntax");
        assert_eq!(list_item(&Value::from("plain")), "plain");
    }

    #[test]
    fn dict_members() {
        let mut out = Vec::new();
        let info = Value::structure([("author", Value::from("alice")), ("size", Value::Int(42))]);
        write_members(&mut out, &info).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "author: alice\nsize: 42\n");
    }

    #[test]
    fn emptiness() {
        assert!(is_empty(&Value::Array(vec![])));
        assert!(is_empty(&Value::Nil));
        assert!(!is_empty(&Value::Int(0)));
        assert!(!is_empty(&Value::Boolean(false)));
    }
}
