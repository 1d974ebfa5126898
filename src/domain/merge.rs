//! JSON 값 deep merge 규칙.
//!
//! 객체끼리는 key 단위로 재귀 병합하고, 그 외 값(배열 포함)은 source 값으로 통째로 교체한다.
//! target에만 있는 key는 그대로 유지된다.

use serde_json::Value;

/// `source`를 `target` 위에 병합한 새 값을 반환한다. 입력은 변경하지 않는다.
pub fn deep_merge(target: &Value, source: &Value) -> Value {
    let mut merged = target.clone();
    merge_into(&mut merged, source);
    merged
}

/// 제자리(in-place) 병합.
pub fn merge_into(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, incoming) in source_map {
                let recurse = incoming.is_object()
                    && matches!(target_map.get(key), Some(Value::Object(_)));
                if recurse && let Some(existing) = target_map.get_mut(key) {
                    merge_into(existing, incoming);
                } else {
                    target_map.insert(key.clone(), incoming.clone());
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_objects_merge_key_by_key() {
        let target = json!({"agents": {"oracle": {"model": "a", "prompt_append": "keep"}}});
        let source = json!({"agents": {"oracle": {"model": "b"}, "explore": {"model": "c"}}});

        let merged = deep_merge(&target, &source);
        assert_eq!(
            merged,
            json!({"agents": {
                "oracle": {"model": "b", "prompt_append": "keep"},
                "explore": {"model": "c"}
            }})
        );
    }

    #[test]
    fn arrays_are_replaced_wholesale() {
        let target = json!({"plugin": ["a", "b"], "disabled": ["x"]});
        let source = json!({"plugin": ["c"]});
        assert_eq!(
            deep_merge(&target, &source),
            json!({"plugin": ["c"], "disabled": ["x"]})
        );
    }

    #[test]
    fn scalars_and_nulls_replace_and_objects_replace_scalars() {
        let target = json!({"a": 1, "b": {"x": 1}, "c": "s"});
        let source = json!({"a": null, "b": 2, "c": {"y": true}});
        assert_eq!(
            deep_merge(&target, &source),
            json!({"a": null, "b": 2, "c": {"y": true}})
        );
    }

    #[test]
    fn inputs_are_not_mutated() {
        let target = json!({"a": {"b": 1}});
        let source = json!({"a": {"c": 2}});
        let _ = deep_merge(&target, &source);
        assert_eq!(target, json!({"a": {"b": 1}}));
        assert_eq!(source, json!({"a": {"c": 2}}));
    }

    #[test]
    fn disjoint_merges_commute() {
        let base = json!({"custom": {"x": 1}, "agents": {"oracle": {"model": "m"}}});
        let a = json!({"agents": {"explore": {"model": "e"}}});
        let b = json!({"categories": {"quick": {"model": "q"}}, "custom": {"y": 2}});

        let ab = deep_merge(&deep_merge(&base, &a), &b);
        let ba = deep_merge(&deep_merge(&base, &b), &a);
        // preserve_order 환경에서도 내용 비교는 순서와 무관하다.
        assert_eq!(ab, ba);
    }

    #[test]
    fn non_object_target_is_replaced_by_source() {
        assert_eq!(deep_merge(&json!([1, 2]), &json!({"a": 1})), json!({"a": 1}));
    }
}
