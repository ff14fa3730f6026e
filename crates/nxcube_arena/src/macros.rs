/// Defines one or more handle newtypes around unsigned integers and
/// implements [`Handle`](crate::Handle) on them.
#[macro_export]
macro_rules! handle_struct {
    (
        $(
            $(#[$attr:meta])*
            $struct_vis:vis struct $struct_name:ident($inner_vis:vis $inner_type:ty);
        )+
    ) => {
        $(
            $(#[$attr])*
            #[derive(Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
            #[repr(transparent)]
            $struct_vis struct $struct_name($inner_vis $inner_type);

            impl ::std::fmt::Debug for $struct_name {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    write!(f, "{}#{}", stringify!($struct_name), self.0)
                }
            }
            impl ::std::fmt::Display for $struct_name {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    write!(f, "#{}", self.0)
                }
            }

            impl $crate::Handle for $struct_name {
                const MAX_INDEX: usize = <$inner_type>::MAX as usize;
                const TYPE_NAME: &'static str = stringify!($struct_name);

                fn to_index(self) -> usize {
                    self.0 as usize
                }

                fn try_from_index(index: usize) -> Result<Self, $crate::HandleOverflow> {
                    match index.try_into() {
                        Ok(i) => Ok(Self(i)),
                        Err(_) => Err($crate::HandleOverflow::new::<Self>()),
                    }
                }
            }
        )+
    };
}
