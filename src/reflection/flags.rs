//! Reflection flags.

use serde::{Deserialize, Serialize};

/// Flag bits for [`ReflectionFlags`].
pub mod reflection_flags {
    pub const NONE: u32 = 0;
    pub const EXPORTED: u32 = 1 << 0;
    pub const PRIVATE: u32 = 1 << 1;
    pub const PROTECTED: u32 = 1 << 2;
    pub const PUBLIC: u32 = 1 << 3;
    pub const STATIC: u32 = 1 << 4;
    pub const OPTIONAL: u32 = 1 << 5;
    pub const READONLY: u32 = 1 << 6;
    pub const ABSTRACT: u32 = 1 << 7;
    pub const CONST: u32 = 1 << 8;
    pub const REST: u32 = 1 << 9;
    pub const EXTERNAL: u32 = 1 << 10;
}

/// Modifier flags carried by every reflection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReflectionFlags(pub u32);

impl ReflectionFlags {
    pub fn has(self, flag: u32) -> bool {
        self.0 & flag != 0
    }

    pub fn set(&mut self, flag: u32, value: bool) {
        if value {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
    }

    pub fn is_exported(self) -> bool {
        self.has(reflection_flags::EXPORTED)
    }

    pub fn is_private(self) -> bool {
        self.has(reflection_flags::PRIVATE)
    }

    pub fn is_protected(self) -> bool {
        self.has(reflection_flags::PROTECTED)
    }

    pub fn is_static(self) -> bool {
        self.has(reflection_flags::STATIC)
    }

    pub fn is_optional(self) -> bool {
        self.has(reflection_flags::OPTIONAL)
    }

    pub fn is_readonly(self) -> bool {
        self.has(reflection_flags::READONLY)
    }

    pub fn is_external(self) -> bool {
        self.has(reflection_flags::EXTERNAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear() {
        let mut flags = ReflectionFlags::default();
        flags.set(reflection_flags::STATIC, true);
        flags.set(reflection_flags::PRIVATE, true);
        assert!(flags.is_static());
        assert!(flags.is_private());

        flags.set(reflection_flags::STATIC, false);
        assert!(!flags.is_static());
        assert!(flags.is_private());
    }
}
