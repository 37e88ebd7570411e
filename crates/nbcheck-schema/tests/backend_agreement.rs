//! Integration test: the compiled and generic backends accept and reject
//! the same documents.
//!
//! Each case pairs a Draft 4 schema with instances that sit on either side
//! of a keyword's boundary. Both backends must agree on every instance, and
//! the generic backend's error count must be zero exactly when the compiled
//! backend's first error is absent.

#![cfg(feature = "compiled")]

use nbcheck_core::Backend;
use nbcheck_schema::{validator_for, NotebookValidator};
use serde_json::{json, Value};

struct Case {
    name: &'static str,
    schema: Value,
    instances: Vec<Value>,
}

fn cases() -> Vec<Case> {
    vec![
        Case {
            name: "negative look-ahead pattern",
            schema: json!({"pattern": "^(?!_)\\w+$"}),
            instances: vec![json!("abc"), json!("_abc"), json!(""), json!(5)],
        },
        Case {
            name: "look-behind pattern",
            schema: json!({"pattern": "(?<=v)\\d+$"}),
            instances: vec![json!("v12"), json!("12"), json!(null)],
        },
        Case {
            name: "look-ahead pattern on metadata keys",
            schema: json!({
                "properties": {
                    "metadata": {"properties": {"name": {"type": "string", "pattern": "^(?!_)\\w+$"}}}
                }
            }),
            instances: vec![
                json!({"metadata": {"name": "abc"}, "cells": []}),
                json!({"metadata": {"name": "_abc"}, "cells": []}),
                json!({"metadata": {"name": "a b"}}),
            ],
        },
        Case {
            name: "patternProperties",
            schema: json!({
                "patternProperties": {"^x-": {"type": "string"}},
                "additionalProperties": false
            }),
            instances: vec![json!({"x-a": "s"}), json!({"x-a": 1}), json!({"y": "s"}), json!({})],
        },
        Case {
            name: "integer versus integral float",
            schema: json!({"type": "integer"}),
            instances: vec![json!(1), json!(1.0), json!(1.5), json!(-0), json!("1")],
        },
        Case {
            name: "number bounds",
            schema: json!({"minimum": 5, "exclusiveMinimum": true, "maximum": 10}),
            instances: vec![json!(5), json!(5.5), json!(10), json!(10.0), json!(11)],
        },
        Case {
            name: "multipleOf with a fractional divisor",
            schema: json!({"multipleOf": 0.5}),
            instances: vec![json!(2), json!(2.5), json!(2.25)],
        },
        Case {
            name: "enum mixes integers and floats",
            schema: json!({"enum": [1, "one", null]}),
            instances: vec![json!(1), json!(1.0), json!("one"), json!(null), json!(2)],
        },
        Case {
            name: "uniqueItems",
            schema: json!({"uniqueItems": true}),
            instances: vec![json!([1, 2]), json!([1, 1]), json!([{"a": 1}, {"a": 1}]), json!([])],
        },
        Case {
            name: "root $ref into definitions",
            schema: json!({
                "definitions": {"name": {"type": "string", "minLength": 2}},
                "$ref": "#/definitions/name"
            }),
            instances: vec![json!("ok"), json!("x"), json!(3)],
        },
        Case {
            name: "$ref with an escaped pointer token",
            schema: json!({
                "definitions": {"a/b": {"minimum": 3}},
                "properties": {"n": {"$ref": "#/definitions/a~1b"}}
            }),
            instances: vec![json!({"n": 3}), json!({"n": 2}), json!({})],
        },
        Case {
            name: "recursive $ref to the root",
            schema: json!({
                "type": "object",
                "properties": {"child": {"$ref": "#"}, "v": {"type": "integer"}}
            }),
            instances: vec![
                json!({"child": {"child": {"v": 1}}}),
                json!({"child": {"child": {"v": "1"}}}),
                json!({"child": 4}),
            ],
        },
        Case {
            name: "oneOf with overlapping alternatives",
            schema: json!({"oneOf": [{"type": "integer"}, {"minimum": 2}]}),
            instances: vec![json!(1), json!(3), json!(2.5), json!("a")],
        },
        Case {
            name: "anyOf and not",
            schema: json!({"anyOf": [{"type": "string"}, {"type": "null"}], "not": {"enum": [""]}}),
            instances: vec![json!("a"), json!(""), json!(null), json!(0)],
        },
        Case {
            name: "property dependencies",
            schema: json!({"dependencies": {"a": ["b"], "c": {"required": ["d"]}}}),
            instances: vec![
                json!({"a": 1, "b": 2}),
                json!({"a": 1}),
                json!({"c": 1}),
                json!({"c": 1, "d": 1}),
            ],
        },
        Case {
            name: "tuple items with additionalItems",
            schema: json!({"items": [{"type": "string"}], "additionalItems": false}),
            instances: vec![json!(["a"]), json!(["a", "b"]), json!([1]), json!([])],
        },
    ]
}

fn pair(schema: &Value) -> (Box<dyn NotebookValidator>, Box<dyn NotebookValidator>) {
    let compiled = validator_for(Backend::Compiled, schema.clone()).expect("schema compiles");
    let generic = validator_for(Backend::Generic, schema.clone()).expect("schema binds");
    (compiled, generic)
}

#[test]
fn backends_agree_on_validity() {
    for case in cases() {
        let (compiled, generic) = pair(&case.schema);
        for instance in &case.instances {
            assert_eq!(
                compiled.validate(instance).is_ok(),
                generic.validate(instance).is_ok(),
                "{}: backends disagree on {instance}",
                case.name
            );
        }
    }
}

#[test]
fn first_error_agrees_with_full_report() {
    for case in cases() {
        let (compiled, generic) = pair(&case.schema);
        for instance in &case.instances {
            assert_eq!(
                compiled.iter_errors(instance, None).count() == 0,
                generic.iter_errors(instance, None).count() == 0,
                "{}: reports disagree on {instance}",
                case.name
            );
        }
    }
}

#[test]
fn boundary_instances_fall_on_both_sides() {
    // Every case must exercise both outcomes, or the agreement above is
    // vacuous for it.
    for case in cases() {
        let (_, generic) = pair(&case.schema);
        let valid = case
            .instances
            .iter()
            .filter(|instance| generic.validate(instance).is_ok())
            .count();
        assert!(valid > 0, "{}: no instance validates", case.name);
        assert!(valid < case.instances.len(), "{}: no instance fails", case.name);
    }
}

#[test]
fn look_ahead_metadata_is_kept_by_both_backends() {
    let schema = json!({
        "properties": {
            "metadata": {"properties": {"name": {"type": "string", "pattern": "^(?!_)\\w+$"}}}
        }
    });
    let (compiled, generic) = pair(&schema);
    for validator in [compiled, generic] {
        let mut doc = json!({"metadata": {"name": "abc"}, "cells": []});
        let errors: Vec<_> = validator.iter_errors(&doc, None).collect();
        assert!(errors.is_empty(), "{}: {errors:?}", validator.backend());
        assert!(!validator.strip_invalid_metadata(&mut doc, &errors));
        assert_eq!(doc["metadata"]["name"], "abc");
    }
}
