mod chain;
mod inspect;
mod mapped_err;

/// A single stage of the approximation pipeline.
///
/// A `Component` takes an input and produces an output. The sampler,
/// interpolator, approximator and presenter are all components, and the
/// pipeline is nothing more than those stages chained together.
///
/// ## Implementing `Component`
///
/// Implement the [`call()`] method, which takes an input and returns either an
/// output or an error. Components hold only their fixed parameters, so the
/// same input always produces the same result.
///
/// ## Composing Components
///
/// Components are combined sequentially using [`Component::chain()`]. To
/// ensure type safety:
/// - The first component's output type must match the second's input type.
/// - Both components must use the same error type.
///
/// Stages with different error types are brought together with
/// [`Component::map_err()`] first. [`Component::inspect()`] observes calls
/// without changing behavior, which is how the pipeline logs its progress.
///
/// [`call()`]: Component::call
pub trait Component {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Calls the component with the given input and returns a result.
    ///
    /// This is the only method required when implementing `Component`.
    ///
    /// # Errors
    ///
    /// Each component defines its own `Error` type, allowing it to determine
    /// what constitutes a failure within its stage.
    fn call(&self, input: Self::Input) -> Result<Self::Output, Self::Error>;

    /// Chains this component with another.
    ///
    /// Ensures type-safe chaining by requiring:
    /// - `Self::Output` matches `Next::Input`.
    /// - Both components share the same `Error` type.
    ///
    /// # Returns
    ///
    /// A new component that first calls `self`, then passes its output to `next`.
    ///
    /// # Example
    /// ```
    /// use std::convert::Infallible;
    /// use blackbox_core::Component;
    ///
    /// struct Square;
    /// impl Component for Square {
    ///     type Input = f64;
    ///     type Output = f64;
    ///     type Error = Infallible;
    ///
    ///     fn call(&self, x: f64) -> Result<f64, Self::Error> {
    ///         Ok(x * x)
    ///     }
    /// }
    ///
    /// struct Offset(f64);
    /// impl Component for Offset {
    ///     type Input = f64;
    ///     type Output = f64;
    ///     type Error = Infallible;
    ///
    ///     fn call(&self, x: f64) -> Result<f64, Self::Error> {
    ///         Ok(x + self.0)
    ///     }
    /// }
    ///
    /// let chain = Square.chain(Offset(1.0));
    /// assert_eq!(chain.call(3.0).unwrap(), 10.0);
    /// ```
    fn chain<Next>(
        self,
        next: Next,
    ) -> impl Component<Input = Self::Input, Output = Next::Output, Error = Self::Error>
    where
        Self: Sized,
        Next: Component<Input = Self::Output, Error = Self::Error>,
    {
        chain::Chain {
            first: self,
            second: next,
        }
    }

    /// Transforms this component's error into a different type.
    ///
    /// # Returns
    ///
    /// A new component with the same input and output types but a transformed
    /// error type.
    fn map_err<ErrorMap, NewError>(
        self,
        error_map: ErrorMap,
    ) -> impl Component<Input = Self::Input, Output = Self::Output, Error = NewError>
    where
        Self: Sized,
        ErrorMap: Fn(Self::Error) -> NewError,
        NewError: std::error::Error + Send + Sync + 'static,
    {
        mapped_err::MappedErr::new(self, error_map)
    }

    /// Inspects inputs and outputs without modifying behavior.
    ///
    /// The output handler only sees successful outputs; errors pass through
    /// untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use std::{cell::RefCell, convert::Infallible};
    /// use blackbox_core::Component;
    ///
    /// struct Negate;
    ///
    /// impl Component for Negate {
    ///     type Input = f64;
    ///     type Output = f64;
    ///     type Error = Infallible;
    ///
    ///     fn call(&self, x: f64) -> Result<f64, Self::Error> {
    ///         Ok(-x)
    ///     }
    /// }
    ///
    /// let seen = RefCell::new(Vec::new());
    /// let traced = Negate.inspect(
    ///     |input| seen.borrow_mut().push(*input),
    ///     |output| seen.borrow_mut().push(*output),
    /// );
    ///
    /// assert_eq!(traced.call(2.5).unwrap(), -2.5);
    /// assert_eq!(*seen.borrow(), [2.5, -2.5]);
    /// ```
    fn inspect<InputHandler, OutputHandler>(
        self,
        input_handler: InputHandler,
        output_handler: OutputHandler,
    ) -> impl Component<Input = Self::Input, Output = Self::Output, Error = Self::Error>
    where
        Self: Sized,
        InputHandler: Fn(&Self::Input),
        OutputHandler: Fn(&Self::Output),
    {
        inspect::Inspect {
            component: self,
            input_handler,
            output_handler,
        }
    }
}

/// A shared reference to a component is itself a component.
///
/// This lets a stage borrow a long-lived collaborator, such as a measurement
/// client, instead of taking ownership of it.
impl<C: Component + ?Sized> Component for &C {
    type Input = C::Input;
    type Output = C::Output;
    type Error = C::Error;

    fn call(&self, input: Self::Input) -> Result<Self::Output, Self::Error> {
        (**self).call(input)
    }
}
