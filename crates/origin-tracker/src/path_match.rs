//! Matching resolved paths against include spellings.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// How a resolved path is matched against the target of an `#include` as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathMatching {
    /// The resolved path must end with the spelling's components.
    PlainSuffix,
    /// Like [`PathMatching::PlainSuffix`], but also accepts Apple framework
    /// includes: `<Foo/Bar.h>` resolving to `.../Foo.framework/Headers/Bar.h`.
    FrameworkAlias,
}

impl PathMatching {
    /// The strategy suited to the host platform.
    pub fn for_host() -> Self {
        if cfg!(target_os = "macos") {
            PathMatching::FrameworkAlias
        } else {
            PathMatching::PlainSuffix
        }
    }

    /// Returns true if `resolved` is what an include of `spelling` resolves to.
    pub fn matches(self, resolved: &Utf8Path, spelling: &str) -> bool {
        if spelling.is_empty() {
            return false;
        }
        if resolved.ends_with(spelling) {
            return true;
        }
        match self {
            PathMatching::PlainSuffix => false,
            PathMatching::FrameworkAlias => framework_alias(resolved, spelling),
        }
    }
}

impl Default for PathMatching {
    fn default() -> Self {
        Self::for_host()
    }
}

// A framework is identified by the `.framework` extension on its directory name.
// The first component of the spelling names the framework; the rest lives under
// its `Headers` directory.
fn framework_alias(resolved: &Utf8Path, spelling: &str) -> bool {
    let mut names = Utf8Path::new(spelling).components().filter_map(|c| match c {
        Utf8Component::Normal(name) => Some(name),
        _ => None,
    });
    let Some(framework) = names.next() else {
        return false;
    };
    let rest: Utf8PathBuf = names.collect();
    if rest.as_str().is_empty() {
        return false;
    }

    resolved.ends_with(&rest) && resolved.as_str().contains(&format!("{framework}.framework"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_suffix() {
        let m = PathMatching::PlainSuffix;
        let resolved = Utf8Path::new("/usr/include/sys/types.h");
        assert!(m.matches(resolved, "types.h"));
        assert!(m.matches(resolved, "sys/types.h"));
        assert!(!m.matches(resolved, "ypes.h"));
        assert!(!m.matches(resolved, "linux/types.h"));
        assert!(!m.matches(resolved, ""));
    }

    #[test]
    fn test_framework_alias() {
        let m = PathMatching::FrameworkAlias;
        let resolved = Utf8Path::new(
            "/SDK/System/Library/Frameworks/CoreFoundation.framework/Headers/CFBase.h",
        );
        assert!(m.matches(resolved, "CoreFoundation/CFBase.h"));
        assert!(!PathMatching::PlainSuffix.matches(resolved, "CoreFoundation/CFBase.h"));
    }

    #[test]
    fn test_framework_alias_requires_framework_dir() {
        let m = PathMatching::FrameworkAlias;
        let resolved = Utf8Path::new("/opt/include/Headers/CFBase.h");
        assert!(!m.matches(resolved, "CoreFoundation/CFBase.h"));
    }

    #[test]
    fn test_framework_alias_single_component() {
        let m = PathMatching::FrameworkAlias;
        let resolved = Utf8Path::new("/F/Foo.framework/Headers/Foo.h");
        assert!(m.matches(resolved, "Foo.h"));
        assert!(!m.matches(resolved, "Foo"));
    }
}
