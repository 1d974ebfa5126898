//! 주석 허용 JSON(JSONC) 원문 텍스트 처리.
//!
//! 주석과 trailing comma를 같은 길이의 공백으로 가려(mask) 바이트 오프셋을 보존한다.
//! 덕분에 가려진 텍스트에서 찾은 범위를 원문에 그대로 적용해 해당 구간만 교체할 수 있다.

use std::ops::Range;

/// 주석을 공백으로 치환한다. 개행은 유지하므로 파서 오류의 줄/열 위치가 원문과 같다.
pub fn mask_comments(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    let mut in_string = false;

    while i < bytes.len() {
        let b = bytes[i];

        if in_string {
            out.push(b);
            if b == b'\\' && i + 1 < bytes.len() {
                out.push(bytes[i + 1]);
                i += 2;
                continue;
            }
            if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match (b, bytes.get(i + 1)) {
            (b'"', _) => {
                in_string = true;
                out.push(b);
                i += 1;
            }
            (b'/', Some(b'/')) => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    out.push(b' ');
                    i += 1;
                }
            }
            (b'/', Some(b'*')) => {
                out.extend_from_slice(b"  ");
                i += 2;
                while i < bytes.len() {
                    if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
                        out.extend_from_slice(b"  ");
                        i += 2;
                        break;
                    }
                    out.push(if bytes[i] == b'\n' { b'\n' } else { b' ' });
                    i += 1;
                }
            }
            _ => {
                out.push(b);
                i += 1;
            }
        }
    }

    // 비 ASCII 바이트는 문자열 내부에서만 그대로 복사되고, 주석 안에서는 ASCII 공백으로 바뀌므로
    // 결과는 항상 유효한 UTF-8이다.
    String::from_utf8(out).unwrap_or_default()
}

/// `}`/`]` 직전의 trailing comma를 공백으로 치환한다. 주석은 이미 가려져 있어야 한다.
pub fn mask_trailing_commas(masked: &str) -> String {
    let mut bytes = masked.as_bytes().to_vec();
    let mut in_string = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if b == b'\\' {
                i += 2;
                continue;
            }
            if b == b'"' {
                in_string = false;
            }
        } else if b == b'"' {
            in_string = true;
        } else if b == b',' {
            let next = bytes[i + 1..]
                .iter()
                .find(|c| !c.is_ascii_whitespace())
                .copied();
            if matches!(next, Some(b'}') | Some(b']')) {
                bytes[i] = b' ';
            }
        }
        i += 1;
    }

    String::from_utf8(bytes).unwrap_or_default()
}

/// 표준 JSON 파서에 넘길 수 있는 텍스트. 바이트 오프셋은 원문과 같다.
pub fn to_strict_json(raw: &str) -> String {
    mask_trailing_commas(&mask_comments(raw))
}

fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// `bytes[start] == '"'`인 문자열 토큰의 끝(닫는 따옴표 다음) 위치.
fn string_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// `start`에서 시작하는 JSON 값의 끝 위치.
fn value_end(bytes: &[u8], start: usize) -> Option<usize> {
    match *bytes.get(start)? {
        b'"' => string_end(bytes, start),
        b'{' | b'[' => {
            let mut depth = 0usize;
            let mut i = start;
            while i < bytes.len() {
                match bytes[i] {
                    b'"' => {
                        i = string_end(bytes, i)?;
                        continue;
                    }
                    b'{' | b'[' => depth += 1,
                    b'}' | b']' => {
                        depth -= 1;
                        if depth == 0 {
                            return Some(i + 1);
                        }
                    }
                    _ => {}
                }
                i += 1;
            }
            None
        }
        _ => {
            let mut i = start;
            while i < bytes.len() && !matches!(bytes[i], b',' | b'}' | b']') && !bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            (i > start).then_some(i)
        }
    }
}

/// 최상위 객체의 `key`에 해당하는 값의 원문 바이트 범위. 중첩 객체 안의 같은 이름은 무시한다.
/// 같은 key가 반복되면 파서가 실제로 사용하는 마지막 값을 가리킨다.
pub fn find_top_level_value(raw: &str, key: &str) -> Option<Range<usize>> {
    let text = to_strict_json(raw);
    let bytes = text.as_bytes();

    let mut i = skip_ws(bytes, 0);
    if bytes.get(i) != Some(&b'{') {
        return None;
    }
    i += 1;

    let mut last = None;
    loop {
        i = skip_ws(bytes, i);
        match *bytes.get(i)? {
            b'}' => return last,
            b',' => i += 1,
            b'"' => {
                let key_end = string_end(bytes, i)?;
                let found = &text[i + 1..key_end - 1];
                i = skip_ws(bytes, key_end);
                if bytes.get(i) != Some(&b':') {
                    return None;
                }
                let value_start = skip_ws(bytes, i + 1);
                let end = value_end(bytes, value_start)?;
                if found == key {
                    last = Some(value_start..end);
                }
                i = end;
            }
            _ => return None,
        }
    }
}

/// 최상위 `{` 바로 뒤에 `"key": value`를 삽입한다. 나머지 원문(주석 포함)은 그대로 둔다.
pub fn insert_after_opening_brace(raw: &str, key: &str, value_text: &str) -> Option<String> {
    let text = to_strict_json(raw);
    let bytes = text.as_bytes();
    let brace = skip_ws(bytes, 0);
    if bytes.get(brace) != Some(&b'{') {
        return None;
    }

    let has_members = bytes.get(skip_ws(bytes, brace + 1)) != Some(&b'}');
    let key_json = serde_json::to_string(key).ok()?;
    let (head, rest) = raw.split_at(brace + 1);

    let mut out = String::with_capacity(raw.len() + value_text.len() + key_json.len() + 8);
    out.push_str(head);
    out.push_str("\n  ");
    out.push_str(&key_json);
    out.push_str(": ");
    out.push_str(value_text);
    if has_members {
        out.push(',');
        out.push_str(rest);
    } else {
        out.push('\n');
        out.push_str(rest.trim_start());
    }
    Some(out)
}

/// 원문의 `range` 구간만 교체한다.
pub fn replace_range(raw: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(raw.len() + replacement.len());
    out.push_str(&raw[..range.start]);
    out.push_str(replacement);
    out.push_str(&raw[range.end..]);
    out
}

/// 여러 줄 값을 한 단계 들여쓴 위치에 넣을 수 있도록 둘째 줄부터 들여쓴다.
pub fn indent_continuation(text: &str, indent: &str) -> String {
    text.lines()
        .enumerate()
        .map(|(idx, line)| {
            if idx == 0 || line.is_empty() {
                line.to_string()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
