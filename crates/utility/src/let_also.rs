/// Kotlin style scope functions, used to keep long query chains flat.
pub trait LetAlso: Sized {
    /// Passes ownership of the value to `f` and returns whatever `f` returns.
    fn let_owned<R, F: FnOnce(Self) -> R>(self, f: F) -> R {
        f(self)
    }
}

impl<T> LetAlso for T {}
