use crate::fixtures::{case_insensitive, init_tracing, merge_json, with_arrays, with_nulls};
use jsonmerge::{ArrayHandling, Content, Document, MergeSettings, NullValueHandling};
use serde_json::json;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_property_is_appended() {
        let doc = merge_json(&json!({"a": 1}), &json!({"b": 2}), &MergeSettings::default());
        assert_eq!(doc.root_value(), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_concat_arrays() {
        let doc = merge_json(&json!([1, 2]), &json!([3, 4]), &with_arrays(ArrayHandling::Concat));
        assert_eq!(doc.root_value(), json!([1, 2, 3, 4]));
    }

    #[test]
    fn test_union_arrays() {
        let doc = merge_json(&json!([1, 2]), &json!([2, 3, 4]), &with_arrays(ArrayHandling::Union));
        assert_eq!(doc.root_value(), json!([1, 2, 3, 4]));
    }

    #[test]
    fn test_replace_arrays() {
        let doc = merge_json(&json!([1, 2, 3]), &json!([4, 5]), &with_arrays(ArrayHandling::Replace));
        assert_eq!(doc.root_value(), json!([4, 5]));
    }

    #[test]
    fn test_null_over_array() {
        let target = json!({"Bar": ["a", "b", "c"]});
        let source = json!({"Bar": null});

        let ignored = merge_json(&target, &source, &with_nulls(NullValueHandling::Ignore));
        assert_eq!(ignored.root_value(), target);

        let merged = merge_json(&target, &source, &with_nulls(NullValueHandling::Merge));
        assert_eq!(merged.root_value(), json!({"Bar": null}));
    }

    #[test]
    fn test_case_insensitive_concat() {
        let doc = merge_json(
            &json!({"Id": "1", "Words": ["User"]}),
            &json!({"id": "1", "words": ["Name"]}),
            &case_insensitive().with_array_handling(ArrayHandling::Concat),
        );
        assert_eq!(doc.root_value(), json!({"Id": "1", "Words": ["User", "Name"]}));
    }

    #[test]
    fn test_merge_into_nested_node() {
        init_tracing();
        let mut doc = Document::from_value(&json!({"a": {"b": {"c": 1}}, "z": 0}));
        let b = doc.get(doc.root(), "a").and_then(|a| doc.get(a, "b")).expect("a.b exists");

        doc.merge(b, json!({"d": [true]})).expect("merge");

        assert_eq!(doc.root_value(), json!({"a": {"b": {"c": 1, "d": [true]}}, "z": 0}));
    }

    #[test]
    fn test_merge_typed_sequence_into_array() {
        init_tracing();
        let mut doc = Document::from_value(&json!({"ids": [1]}));
        let ids = doc.get(doc.root(), "ids").expect("ids exists");

        doc.merge(ids, vec![2_u32, 3]).expect("merge vec");
        doc.merge(ids, &[4_i64][..]).expect("merge slice");
        doc.merge(ids, Content::from(vec![Some(5.5_f64), None])).expect("merge options");

        assert_eq!(doc.root_value(), json!({"ids": [1, 2, 3, 4, 5.5, null]}));
    }

    #[test]
    fn test_merge_between_documents() {
        init_tracing();
        let defaults = Document::from_value(&json!({"retries": 3, "endpoints": ["a"]}));
        let mut user = Document::from_value(&json!({"endpoints": ["b"], "verbose": true}));
        let settings = with_arrays(ArrayHandling::Union);

        user.merge_with(user.root(), &defaults, &settings).expect("merge");

        assert_eq!(user.root_value(), json!({"endpoints": ["b", "a"], "verbose": true, "retries": 3}));
        assert_eq!(defaults.root_value(), json!({"retries": 3, "endpoints": ["a"]}));
    }
}
