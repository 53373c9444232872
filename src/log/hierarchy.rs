//! 分类层级
//!
//! 分类名以 `.` 分隔层级，所有分类的根祖先都是 `Default`。
//! 解析有效过滤器和枚举配置时使用同一个祖先遍历，保证两者结果一致。

use crate::log::filter::LevelFilter;

/// 根分类名
pub const DEFAULT_CATEGORY: &str = "Default";

/// 分类层级分隔符
pub const SEPARATOR: char = '.';

/// 祖先分类迭代器
///
/// 依次产出完整名称、逐级截断后的前缀，最后是 `Default`（只出现一次）
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    next: Option<&'a str>,
    default_pending: bool,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(name) = self.next {
            self.next = name.rfind(SEPARATOR).map(|idx| &name[..idx]);
            if name == DEFAULT_CATEGORY {
                self.default_pending = false;
            }
            return Some(name);
        }

        if self.default_pending {
            self.default_pending = false;
            return Some(DEFAULT_CATEGORY);
        }

        None
    }
}

/// 从分类名开始遍历祖先
pub fn ancestors(name: &str) -> Ancestors<'_> {
    Ancestors {
        next: if name.is_empty() { None } else { Some(name) },
        default_pending: true,
    }
}

/// `name` 是否等于 `namespace` 或是其按层级划分的后代
///
/// `Foo.Bar` 属于 `Foo`，但不属于 `Foo.Ba`
pub fn is_within(name: &str, namespace: &str) -> bool {
    match name.strip_prefix(namespace) {
        Some(rest) => rest.is_empty() || rest.starts_with(SEPARATOR),
        None => false,
    }
}

/// 分类名是否合法：非空，且每一段都非空
pub fn is_valid(name: &str) -> bool {
    !name.is_empty() && name.split(SEPARATOR).all(|segment| !segment.is_empty())
}

/// 解析分类的有效过滤器
///
/// 返回第一个在 `lookup` 中找到的祖先的过滤器，都找不到时返回 `default`
pub fn resolve<F>(name: &str, lookup: F, default: LevelFilter) -> LevelFilter
where
    F: Fn(&str) -> Option<LevelFilter>,
{
    ancestors(name)
        .find_map(|ancestor| lookup(ancestor))
        .unwrap_or(default)
}
