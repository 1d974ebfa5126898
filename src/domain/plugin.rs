//! `plugin` 목록 항목(`name@version-or-tag`) 규칙.

use std::collections::BTreeMap;

/// 자체 패키지(plugin) 이름.
pub const PACKAGE_NAME: &str = "oh-my-opencode";

/// 배포 태그 우선순위. 나머지 태그는 이름순으로 뒤에 검사한다.
pub const PRIORITY_DIST_TAGS: [&str; 3] = ["latest", "beta", "next"];

/// `@suffix`를 제외한 기본 이름. scope(`@org/pkg`)의 선행 `@`는 이름에 포함된다.
pub fn plugin_base_name(entry: &str) -> &str {
    match entry.rfind('@') {
        Some(idx) if idx > 0 => &entry[..idx],
        _ => entry,
    }
}

/// `plugin` 목록 편집 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginEdit {
    /// 동일 항목이 이미 있어 변경 없음
    Unchanged,
    /// 같은 기본 이름의 항목을 제자리에서 교체함
    Replaced { previous: String },
    /// 목록 끝에 추가함
    Appended,
}

impl PluginEdit {
    pub fn changed(&self) -> bool {
        !matches!(self, PluginEdit::Unchanged)
    }
}

/// 기본 이름 기준으로 항목이 정확히 한 번 존재하도록 목록을 보정한다.
/// 같은 기본 이름의 중복 항목이 이미 있으면 첫 항목만 남긴다.
pub fn ensure_plugin_entry(list: &mut Vec<String>, entry: &str) -> PluginEdit {
    let base = plugin_base_name(entry);
    let Some(first) = list.iter().position(|p| plugin_base_name(p) == base) else {
        list.push(entry.to_string());
        return PluginEdit::Appended;
    };

    let before = list.len();
    let mut seen = false;
    list.retain(|p| {
        if plugin_base_name(p) != base {
            return true;
        }
        let keep = !seen;
        seen = true;
        keep
    });
    let removed_duplicates = list.len() != before;

    if list[first] == entry {
        if removed_duplicates {
            return PluginEdit::Replaced {
                previous: entry.to_string(),
            };
        }
        return PluginEdit::Unchanged;
    }

    let previous = std::mem::replace(&mut list[first], entry.to_string());
    PluginEdit::Replaced { previous }
}

/// 현재 버전과 일치하는 배포 태그를 우선순위대로 찾는다.
pub fn select_dist_tag(dist_tags: &BTreeMap<String, String>, version: &str) -> Option<String> {
    let prioritized = PRIORITY_DIST_TAGS
        .iter()
        .copied()
        .filter(|tag| dist_tags.get(*tag).is_some_and(|v| v == version));
    let remaining = dist_tags
        .iter()
        .filter(|(tag, v)| !PRIORITY_DIST_TAGS.contains(&tag.as_str()) && v.as_str() == version)
        .map(|(tag, _)| tag.as_str());

    prioritized.chain(remaining).next().map(str::to_string)
}

/// 배포 태그가 있으면 `name@tag`, 없으면 `name@version` 형태로 항목을 만든다.
pub fn plugin_entry(name: &str, version: &str, dist_tags: Option<&BTreeMap<String, String>>) -> String {
    match dist_tags.and_then(|tags| select_dist_tag(tags, version)) {
        Some(tag) => format!("{name}@{tag}"),
        None => format!("{name}@{version}"),
    }
}
