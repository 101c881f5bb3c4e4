/// Declares a typed position into a table of `$item`.
///
/// Only `[$item]` can be indexed with it, which keeps matrix positions from
/// being mixed up with raw location ids.
macro_rules! position_newtype {
    ($(#[$meta:meta])* $name:ident => $item:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
        pub struct $name(usize);

        impl $name {
            pub const fn new(position: usize) -> Self {
                Self(position)
            }

            pub const fn get(self) -> usize {
                self.0
            }

            /// Every position of a table holding `len` items, in order.
            pub fn all(len: usize) -> impl Iterator<Item = Self> + Clone {
                (0..len).map(Self)
            }
        }

        impl std::ops::Index<$name> for [$item] {
            type Output = $item;

            fn index(&self, position: $name) -> &$item {
                &self[position.0]
            }
        }
    };
}

pub(crate) use position_newtype;
