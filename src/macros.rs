/// Implements the identifier and lib accessors shared by every object that can
/// carry an object lib (points, contours, components, anchors and guidelines).
///
/// The type must have `identifier: Option<Identifier>` and `lib: Option<Plist>`
/// fields.
macro_rules! impl_object_lib {
    ($ty:ident, $what:literal) => {
        impl $ty {
            #[doc = concat!("The ", $what, "'s lib, if it has one.")]
            pub fn lib(&self) -> Option<&$crate::Plist> {
                self.lib.as_ref()
            }

            #[doc = concat!("A mutable reference to the ", $what, "'s lib, if it has one.")]
            pub fn lib_mut(&mut self) -> Option<&mut $crate::Plist> {
                self.lib.as_mut()
            }

            /// Replace the lib, returning the previous one.
            ///
            /// An object with a lib must have an identifier; if there is none
            /// yet, a random one is assigned.
            pub fn replace_lib(&mut self, lib: $crate::Plist) -> Option<$crate::Plist> {
                #[cfg(feature = "object-libs")]
                if self.identifier.is_none() {
                    self.identifier = Some($crate::Identifier::from_uuidv4());
                }
                self.lib.replace(lib)
            }

            /// Remove the lib, leaving `None` in its place.
            pub fn take_lib(&mut self) -> Option<$crate::Plist> {
                self.lib.take()
            }

            #[doc = concat!("The ", $what, "'s identifier, if it has one.")]
            pub fn identifier(&self) -> Option<&$crate::Identifier> {
                self.identifier.as_ref()
            }

            /// Replace the identifier, returning the previous one.
            pub fn replace_identifier(
                &mut self,
                id: $crate::Identifier,
            ) -> Option<$crate::Identifier> {
                self.identifier.replace(id)
            }
        }
    };
}
