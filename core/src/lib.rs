//! # Todoflow Core
//!
//! Core traits and types for Todoflow, a task-list client that keeps a local
//! view of a remote todo collection consistent with an unreliable HTTP resource.
//!
//! The crate follows the reducer pattern:
//!
//! - **State**: The authoritative todo collection plus view bookkeeping
//! - **Action**: User intents and the settled outcomes of requests
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies (`TodoApi`, `InputFocus`)
//!
//! ## Example
//!
//! ```
//! use todoflow_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct InputState {
//!     text: String,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum InputAction {
//!     Changed(String),
//!     Cleared,
//! }
//!
//! struct InputReducer;
//!
//! impl Reducer for InputReducer {
//!     type State = InputState;
//!     type Action = InputAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut InputState,
//!         action: InputAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<InputAction>; 4]> {
//!         match action {
//!             InputAction::Changed(text) => state.text = text,
//!             InputAction::Cleared => state.text.clear(),
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = InputState::default();
//! InputReducer.reduce(&mut state, InputAction::Changed("milk".into()), &());
//! assert_eq!(state.text, "milk");
//! ```

// Re-export commonly used types
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

/// Remote todo resource abstraction
pub mod api;

/// Declarative macros for building effects
pub mod effect_macros;

/// Todo resource data model
pub mod todo;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// Effects are started by the runtime in the order returned.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable and cancellable.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Label under which a running effect can be cancelled
    ///
    /// Labels are static so reducers can declare them as constants:
    ///
    /// ```
    /// use todoflow_core::effect::EffectId;
    ///
    /// const NOTICE_TIMER: EffectId = EffectId::new("notice-timer");
    /// assert_eq!(NOTICE_TIMER.as_str(), "notice-timer");
    /// ```
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EffectId(&'static str);

    impl EffectId {
        /// Creates a new effect label
        #[must_use]
        pub const fn new(label: &'static str) -> Self {
            Self(label)
        }

        /// Returns the label text
        #[must_use]
        pub const fn as_str(&self) -> &'static str {
            self.0
        }
    }

    impl std::fmt::Display for EffectId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.0)
        }
    }

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (for notice expiry)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),

        /// Run an effect that a later [`Effect::Cancel`] with the same id can abort
        Cancellable {
            /// Cancellation label
            id: EffectId,
            /// The effect to run
            effect: Box<Effect<Action>>,
        },

        /// Abort every running effect registered under the id
        Cancel(EffectId),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
                Effect::Cancellable { id, effect } => f
                    .debug_struct("Effect::Cancellable")
                    .field("id", id)
                    .field("effect", effect)
                    .finish(),
                Effect::Cancel(id) => f.debug_tuple("Effect::Cancel").field(id).finish(),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Wrap this effect so it can be cancelled under `id`
        #[must_use]
        pub fn cancellable(self, id: EffectId) -> Effect<Action> {
            Effect::Cancellable {
                id,
                effect: Box::new(self),
            }
        }

        /// Returns `true` for [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter. The remote resource lives in [`crate::api`].
pub mod environment {
    /// Sink for "move the cursor to the new-todo input" requests
    ///
    /// The orchestrator emits focus requests as effects; the rendering surface
    /// decides what focusing means.
    ///
    /// # Examples
    ///
    /// ```
    /// use todoflow_core::environment::InputFocus;
    ///
    /// // Headless surfaces simply ignore focus requests
    /// struct Headless;
    /// impl InputFocus for Headless {
    ///     fn focus_input(&self) {}
    /// }
    /// ```
    pub trait InputFocus: Send + Sync {
        /// Request focus for the new-todo input
        fn focus_input(&self);
    }

    /// Focus sink that does nothing
    #[derive(Clone, Copy, Debug, Default)]
    pub struct NoFocus;

    impl InputFocus for NoFocus {
        fn focus_input(&self) {}
    }
}
