use crate::fixtures::{case_insensitive, init_tracing, merge_json, with_arrays, with_nulls};
use jsonmerge::{ArrayHandling, Content, Document, MergeError, MergeSettings, NullValueHandling};
use serde_json::json;

struct Version;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_invalid_object() {
        init_tracing();
        let mut doc = Document::new();

        let err = doc.merge(doc.root(), Content::from_any(&Version)).expect_err("unsupported content");

        assert!(matches!(err, MergeError::InvalidContentType { .. }));
        assert_eq!(
            err.to_string(),
            format!(
                "Could not determine JSON object type for type {}.",
                std::any::type_name::<Version>()
            )
        );
        assert_eq!(doc.to_string(), "{}");
    }

    #[test]
    fn test_merge_array_self() {
        init_tracing();
        let mut doc = Document::from_value(&json!(["1", "2"]));
        let root = doc.root();

        doc.merge_with(root, root, &with_arrays(ArrayHandling::Replace)).expect("merge");

        assert_eq!(doc.root_value(), json!(["1", "2"]));
    }

    #[test]
    fn test_merge_object_self() {
        init_tracing();
        let mut doc = Document::from_value(&json!({"1": 1, "2": 2}));
        let root = doc.root();

        doc.merge_with(root, root, &with_arrays(ArrayHandling::Replace)).expect("merge");

        assert_eq!(doc.root_value(), json!({"1": 1, "2": 2}));
    }

    #[test]
    fn test_merge_object_property() {
        let doc = merge_json(&json!({"Property1": 1}), &json!({"Property2": 2}), &MergeSettings::default());
        assert_eq!(doc.to_string(), "{\n  \"Property1\": 1,\n  \"Property2\": 2\n}");
    }

    #[test]
    fn test_merge_child_object() {
        let doc = merge_json(
            &json!({"Property1": {"SubProperty1": 1}}),
            &json!({"Property1": {"SubProperty2": 2}}),
            &MergeSettings::default(),
        );
        assert_eq!(
            doc.to_string(),
            r#"{
  "Property1": {
    "SubProperty1": 1,
    "SubProperty2": 2
  }
}"#
        );
    }

    #[test]
    fn test_merge_mismatched_types_root() {
        let doc = merge_json(
            &json!({"Property1": {"SubProperty1": 1}}),
            &json!([{"Property1": 1}, {"Property1": 1}]),
            &MergeSettings::default(),
        );
        assert_eq!(
            doc.to_string(),
            r#"{
  "Property1": {
    "SubProperty1": 1
  }
}"#
        );
    }

    #[test]
    fn test_merge_multiple_objects() {
        let doc = merge_json(
            &json!({"Property1": {"SubProperty1": 1}}),
            &json!({"Property1": {"SubProperty2": 2}, "Property2": 2}),
            &MergeSettings::default(),
        );
        assert_eq!(
            doc.to_string(),
            r#"{
  "Property1": {
    "SubProperty1": 1,
    "SubProperty2": 2
  },
  "Property2": 2
}"#
        );
    }

    #[test]
    fn test_merge_array_positionally_with_nulls() {
        let left = json!({
            "Array1": [
                {
                    "Property1": {
                        "Property1": 1,
                        "Property2": 2,
                        "Property3": 3,
                        "Property4": 4,
                        "Property5": null
                    }
                },
                {},
                3,
                null,
                5,
                null
            ]
        });
        let right = json!({
            "Array1": [
                {
                    "Property1": {
                        "Property1": null,
                        "Property2": 3,
                        "Property3": {},
                        "Property5": null
                    }
                },
                null,
                null,
                4,
                5.1,
                null,
                {"Property1": 1}
            ]
        });

        let doc = merge_json(&left, &right, &with_arrays(ArrayHandling::Merge));

        assert_eq!(
            doc.to_string(),
            r#"{
  "Array1": [
    {
      "Property1": {
        "Property1": 1,
        "Property2": 3,
        "Property3": {},
        "Property4": 4,
        "Property5": null
      }
    },
    {},
    3,
    4,
    5.1,
    null,
    {
      "Property1": 1
    }
  ]
}"#
        );
    }

    #[test]
    fn test_concat_array() {
        let doc = merge_json(
            &json!({"Array1": [{"Property1": 1}, {"Property1": 1}]}),
            &json!({"Array1": [{"Property1": 1}, {"Property2": 2}, {"Property3": 3}]}),
            &with_arrays(ArrayHandling::Concat),
        );
        assert_eq!(
            doc.to_string(),
            r#"{
  "Array1": [
    {
      "Property1": 1
    },
    {
      "Property1": 1
    },
    {
      "Property1": 1
    },
    {
      "Property2": 2
    },
    {
      "Property3": 3
    }
  ]
}"#
        );
    }

    #[test]
    fn test_merge_mismatching_types_in_array() {
        let doc = merge_json(
            &json!([true, null, {"Property1": 1}, [1], {"Property1": 1}, 1, [1]]),
            &json!([1, 5, [1], {"Property1": 1}, true, {"Property1": 1}, null]),
            &with_arrays(ArrayHandling::Merge),
        );
        assert_eq!(
            doc.to_string(),
            r#"[
  1,
  5,
  {
    "Property1": 1
  },
  [
    1
  ],
  {
    "Property1": 1
  },
  {
    "Property1": 1
  },
  [
    1
  ]
]"#
        );
    }

    #[test]
    fn test_merge_mismatching_types_in_object() {
        let doc = merge_json(
            &json!({"Property1": [1], "Property2": [1], "Property3": true, "Property4": true}),
            &json!({"Property1": {"Nested": true}, "Property2": true, "Property3": [1], "Property4": null}),
            &MergeSettings::default(),
        );
        assert_eq!(
            doc.to_string(),
            r#"{
  "Property1": {
    "Nested": true
  },
  "Property2": true,
  "Property3": [
    1
  ],
  "Property4": true
}"#
        );
    }

    #[test]
    fn test_merge_array_overwrite_nested() {
        let doc = merge_json(
            &json!({"Array1": [1, 2, 3]}),
            &json!({"Array1": [4, 5]}),
            &with_arrays(ArrayHandling::Replace),
        );
        assert_eq!(doc.to_string(), "{\n  \"Array1\": [\n    4,\n    5\n  ]\n}");
    }

    #[test]
    fn test_union_arrays_of_objects() {
        let doc = merge_json(
            &json!({"Array1": [{"Property1": 1}, {"Property1": 1}]}),
            &json!({"Array1": [{"Property1": 1}, {"Property2": 2}, {"Property3": 3}]}),
            &with_arrays(ArrayHandling::Union),
        );
        assert_eq!(
            doc.root_value(),
            json!({"Array1": [{"Property1": 1}, {"Property1": 1}, {"Property2": 2}, {"Property3": 3}]})
        );
    }

    #[test]
    fn test_merge_default_containers() {
        let object = merge_json(&json!({}), &json!({}), &MergeSettings::default());
        assert_eq!(object.len(object.root()), 0);

        let array = merge_json(&json!([]), &json!([]), &MergeSettings::default());
        assert_eq!(array.len(array.root()), 0);
    }

    #[test]
    fn test_merge_null() {
        init_tracing();
        for initial in [json!({}), json!([])] {
            let mut doc = Document::from_value(&initial);
            doc.merge(doc.root(), Content::Null).expect("merge");
            assert_eq!(doc.len(doc.root()), 0);
        }
    }

    #[test]
    fn test_null_value_handling_object() {
        let original = "{\n  \"Bar\": {}\n}";
        let incoming: Document = "{\n  \"Bar\": null\n}".parse().expect("valid JSON");

        let mut doc: Document = original.parse().expect("valid JSON");
        doc.merge_with(doc.root(), &incoming, &with_nulls(NullValueHandling::Ignore)).expect("merge");
        assert_eq!(doc.to_string(), original);

        doc.merge_with(doc.root(), &incoming, &with_nulls(NullValueHandling::Merge)).expect("merge");
        assert_eq!(doc.to_string(), incoming.to_string());
    }

    #[test]
    fn test_ignore_property_case() {
        let mut target: Document = r#"{
            "Id": "1",
            "Words": [ "User" ]
        }"#
        .parse()
        .expect("valid JSON");
        let source: Document = r#"{
            "Id": "1",
            "words": [ "Name" ]
        }"#
        .parse()
        .expect("valid JSON");
        let settings = case_insensitive()
            .with_array_handling(ArrayHandling::Concat)
            .with_null_value_handling(NullValueHandling::Merge);

        target.merge_with(target.root(), &source, &settings).expect("merge");

        assert!(target.get(target.root(), "words").is_none());
        let words = target.get(target.root(), "Words").expect("Words kept");
        assert_eq!(target.to_value(words), Some(json!(["User", "Name"])));
    }

    #[test]
    fn test_settings_default_comparison_is_exact() {
        assert_eq!(
            MergeSettings::default().property_name_comparison,
            jsonmerge::PropertyNameComparison::Exact
        );
    }
}
