#[macro_export]
/// Implements [`crate::IndexRef`] for a newtype wrapping an unsigned
/// integer. Defaults to a `u32` backing type.
macro_rules! impl_index {
    ($struct_name: ident) => {
        impl_index!($struct_name, u32);
    };

    ($struct_name: ident, $backing_ty: ty) => {
        impl $crate::IndexRef for $struct_name {
            fn index(&self) -> usize {
                self.0 as usize
            }

            fn new(input: usize) -> Self {
                Self(input as $backing_ty)
            }
        }

        impl From<$backing_ty> for $struct_name {
            fn from(input: $backing_ty) -> Self {
                $struct_name(input)
            }
        }

        impl From<usize> for $struct_name {
            fn from(input: usize) -> Self {
                $crate::IndexRef::new(input)
            }
        }
    };
}

#[macro_export]
/// Implements [`crate::IndexRef`] for a newtype wrapping a `NonZero`
/// integer, where index `0` is reserved as an internal sentinel (see the
/// `find_symbolic_state`/`find_time_index` "sentinel zero" protocol).
/// Defaults to `NonZeroU32`.
macro_rules! impl_index_nonzero {
    ($struct_name: ident) => {
        impl_index_nonzero!($struct_name, std::num::NonZeroU32, u32);
    };

    ($struct_name: ident, $non_zero_type:ty, $normal_type:ty) => {
        impl $crate::IndexRef for $struct_name {
            fn index(&self) -> usize {
                self.0.get() as usize - 1
            }

            fn new(input: usize) -> Self {
                Self(
                    <$non_zero_type>::new((input + 1) as $normal_type)
                        .unwrap(),
                )
            }
        }

        impl From<$non_zero_type> for $struct_name {
            fn from(input: $non_zero_type) -> Self {
                $struct_name(input)
            }
        }

        impl From<usize> for $struct_name {
            fn from(input: usize) -> Self {
                $crate::IndexRef::new(input)
            }
        }
    };
}
