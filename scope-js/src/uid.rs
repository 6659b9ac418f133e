use crate::scope::ScopeId;
use crate::scope::ScopeTree;
use tracing::trace;
use tree_js::char::is_id_continue;
use tree_js::char::is_id_start;
use tree_js::lex::is_reserved_word;

pub fn is_valid_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  chars.next().is_some_and(is_id_start) && chars.all(is_id_continue) && !is_reserved_word(name)
}

/// Turns arbitrary text into an identifier. Characters that can't appear in one act as word
/// separators and upper-case the character after them, so `foo-bar` becomes `fooBar`. Leading digits
/// and separators are dropped. A result that still isn't a usable name gets a `_` prefix.
pub fn to_identifier(name: &str) -> String {
  let mut out = String::with_capacity(name.len());
  let mut upper_next = false;
  for c in name.chars() {
    if !is_id_continue(c) {
      upper_next = !out.is_empty();
      continue;
    }
    if out.is_empty() && c.is_ascii_digit() {
      continue;
    }
    if upper_next {
      out.extend(c.to_uppercase());
      upper_next = false;
    } else {
      out.push(c);
    }
  }
  if !is_valid_identifier(&out) {
    out.insert(0, '_');
  }
  out
}

/// The stem shared by every uid generated from `name`: `_foo2` and `foo` both give `foo`.
pub fn uid_base(name: &str) -> String {
  let ident = to_identifier(name);
  let base = ident
    .trim_start_matches('_')
    .trim_end_matches(|c: char| c.is_ascii_digit());
  if base.is_empty() {
    "temp".to_string()
  } else {
    base.to_string()
  }
}

impl ScopeTree {
  /// Whether `name` would clash with anything visible from `scope`: a binding, a label, an earlier
  /// uid, or a global the program refers to.
  pub fn is_name_taken(&self, scope: ScopeId, name: &str) -> bool {
    self.has_binding(scope, name)
      || self.has_label_in_chain(scope, name)
      || self.has_uid(scope, name)
      || self.has_global(name)
  }

  /// Mints a fresh name derived from `base`: `_base`, then `_base2`, `_base3` and so on. The
  /// result is reserved, so later calls never hand it out again.
  pub fn generate_uid(&mut self, scope: ScopeId, base: &str) -> String {
    let base = uid_base(base);
    let mut i = 1;
    let uid = loop {
      let candidate = if i > 1 {
        format!("_{base}{i}")
      } else {
        format!("_{base}")
      };
      if !self.is_name_taken(scope, &candidate) {
        break candidate;
      }
      i += 1;
    };
    let root = self.root();
    self.scopes[root.index()].uids.insert(uid.clone());
    trace!(uid = %uid, "generated uid");
    uid
  }
}

#[cfg(test)]
mod tests {
  use super::to_identifier;
  use super::uid_base;

  #[test]
  fn test_to_identifier() {
    assert_eq!(to_identifier("foo"), "foo");
    assert_eq!(to_identifier("foo-bar"), "fooBar");
    assert_eq!(to_identifier("foo bar baz"), "fooBarBaz");
    assert_eq!(to_identifier("123abc"), "abc");
    assert_eq!(to_identifier("-x"), "x");
    assert_eq!(to_identifier("$el"), "$el");
    assert_eq!(to_identifier("class"), "_class");
    assert_eq!(to_identifier(""), "_");
  }

  #[test]
  fn test_uid_base() {
    assert_eq!(uid_base("foo"), "foo");
    assert_eq!(uid_base("_foo2"), "foo");
    assert_eq!(uid_base("__a1b22"), "a1b");
    assert_eq!(uid_base("class"), "class");
    assert_eq!(uid_base(""), "temp");
    assert_eq!(uid_base("42"), "temp");
  }
}
