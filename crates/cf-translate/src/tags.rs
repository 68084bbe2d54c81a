//! Chinese labels for Codeforces problem tags

/// Codeforces tag → Chinese label
const TAG_LABELS: &[(&str, &str)] = &[
    ("math", "数学"),
    ("implementation", "实现"),
    ("dp", "DP"),
    ("greedy", "贪心"),
    ("brute force", "暴力"),
    ("constructive algorithms", "构造"),
    ("sortings", "排序"),
    ("binary search", "二分"),
    ("graphs", "图论"),
    ("trees", "树"),
    ("strings", "字符串"),
    ("data structures", "数据结构"),
    ("geometry", "几何"),
    ("number theory", "数论"),
    ("combinatorics", "组合数学"),
    ("two pointers", "双指针"),
    ("bitmasks", "位运算"),
    ("dfs and similar", "DFS"),
    ("shortest paths", "最短路"),
    ("probabilities", "概率"),
    ("games", "博弈"),
    ("flows", "网络流"),
    ("dsu", "并查集"),
    ("divide and conquer", "分治"),
    ("hashing", "哈希"),
    ("interactive", "交互"),
    ("schedules", "调度"),
    ("matrices", "矩阵"),
    ("fft", "FFT"),
    ("ternary search", "三分"),
    ("expression parsing", "表达式解析"),
    ("meet-in-the-middle", "折半搜索"),
    ("2-sat", "2-SAT"),
    ("chinese remainder theorem", "中国剩余定理"),
];

/// Full-width comma used between Chinese tag labels
pub const TAG_SEPARATOR_ZH: &str = "，";

/// Chinese label for a tag; unknown tags are returned unchanged
pub fn tag_label(tag: &str) -> &str {
    let lower = tag.to_lowercase();
    TAG_LABELS
        .iter()
        .find(|(en, _)| *en == lower)
        .map(|(_, zh)| *zh)
        .unwrap_or(tag)
}

/// Localise and join tags with the full-width comma
pub fn tags_to_chinese(tags: &[String]) -> String {
    tags.iter()
        .map(|t| tag_label(t))
        .collect::<Vec<_>>()
        .join(TAG_SEPARATOR_ZH)
}
