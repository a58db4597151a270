//! Operating mode of the evaluator.

crate::state_enum! {
    /// Whether the evaluator is accepting input or showing a fault.
    ///
    /// `Normal -> Faulted` happens only when an evaluation divides by zero.
    /// `Faulted -> Normal` happens when the fault timer expires or the
    /// machine is cleared.
    #[derive(Copy, Eq, Hash)]
    pub enum Mode {
        Normal,
        Faulted,
    }
    error: [Faulted]
}
