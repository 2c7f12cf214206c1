use super::*;
use pretty_assertions::assert_eq;

#[test]
fn display_formats() {
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::Float(2.0).to_string(), "2.0");
    assert_eq!(Value::Float(2.5).to_string(), "2.5");
    assert_eq!(Value::from("plain").to_string(), "plain");

    let list = Value::list(vec![Value::Int(1), Value::from("a"), Value::Null]);
    assert_eq!(list.to_string(), "[1, a, null]");

    let mut entries = BTreeMap::new();
    entries.insert("b".to_string(), Value::Bool(true));
    entries.insert("a".to_string(), Value::Int(1));
    assert_eq!(Value::map(entries).to_string(), "{a=1, b=true}");
}

#[test]
fn equality_is_strict_across_variants() {
    assert_ne!(Value::Int(1), Value::Float(1.0));
    assert_ne!(Value::Int(0), Value::Null);
    assert_eq!(Value::from("x"), Value::string(String::from("x")));
    assert_eq!(Value::default(), Value::Null);
}

#[test]
fn lists_compare_by_contents_and_share_mutation() {
    let a = Value::list(vec![Value::Int(1)]);
    let b = Value::list(vec![Value::Int(1)]);
    assert_eq!(a, b);

    let alias = a.clone();
    if let Value::List(items) = &alias {
        items.borrow_mut().push(Value::Int(2));
    }
    assert_eq!(a.to_string(), "[1, 2]");
    assert_ne!(a, b);
}

#[test]
fn accessors() {
    assert_eq!(Value::Int(4).as_int(), Some(4));
    assert_eq!(Value::Float(4.0).as_int(), None);
    assert_eq!(Value::Bool(true).as_bool(), Some(true));
    assert_eq!(Value::from("s").as_str(), Some("s"));
    assert!(Value::Null.is_null());
    assert!(Value::Int(1).as_function().is_none());
}

#[test]
fn type_names() {
    assert_eq!(Value::Int(1).type_name(), "Integer");
    assert_eq!(Value::Float(1.0).type_name(), "Double");
    assert_eq!(Value::list(Vec::new()).type_name(), "List");
    assert_eq!(Value::Null.type_name(), "null");
}
