use std::future::IntoFuture;
use std::marker::PhantomData;

// Adapted from: https://github.com/HalsekiRaika/architectured/blob/e5caa5c7ae801d1aaac6e275b3ea0ef26d6ff26b/server/src/controller.rs
/// Turns a request into the input of an application service.
pub trait Intake<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

/// Like [`Intake`], for requests that must be validated first.
pub trait TryIntake<I>: 'static + Sync + Send {
    type To;
    type Error;
    fn emit(&self, input: I) -> Result<Self::To, Self::Error>;
}

/// Turns a service result into a response.
pub trait Exhaust<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

pub struct Controller<T, P, I, D, O> {
    transformer: T,
    presenter: P,
    _i: PhantomData<I>,
    _t: PhantomData<D>,
    _o: PhantomData<O>,
}

impl<T, P, I, D, O> Controller<T, P, I, D, O> {
    pub fn new(transformer: T, presenter: P) -> Self {
        Self {
            transformer,
            presenter,
            _i: PhantomData,
            _t: PhantomData,
            _o: PhantomData,
        }
    }

    fn preset(self) -> P {
        self.presenter
    }
}

impl<T, P, I, D, O> Controller<T, P, I, D, O>
where
    T: Intake<I, To = D>,
{
    pub fn intake(self, input: I) -> Transformed<T, P, I, D, O> {
        Transformed {
            transformed: self.transformer.emit(input),
            controller: self,
        }
    }
}

impl<T, P, I, D, O> Controller<T, P, I, D, O>
where
    T: TryIntake<I, To = D>,
{
    pub fn try_intake(self, input: I) -> Result<Transformed<T, P, I, D, O>, T::Error> {
        Ok(Transformed {
            transformed: self.transformer.emit(input)?,
            controller: self,
        })
    }
}

impl<P, O> Controller<(), P, (), (), O>
where
    P: Exhaust<O>,
{
    pub async fn bypass<F, Fut, E>(self, f: F) -> Result<P::To, E>
    where
        F: FnOnce() -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        Ok(self.preset().emit(f().await?))
    }
}

pub struct Transformed<T, P, I, D, O> {
    transformed: D,
    controller: Controller<T, P, I, D, O>,
}

impl<T, P, I, D, O> Transformed<T, P, I, D, O>
where
    P: Exhaust<O>,
{
    pub async fn handle<F, Fut, E>(self, f: F) -> Result<P::To, E>
    where
        F: FnOnce(D) -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        Ok(self.controller.preset().emit(f(self.transformed).await?))
    }
}

#[cfg(test)]
mod test {
    use super::{Controller, Exhaust, Intake, TryIntake};

    struct Doubler;

    impl Intake<i32> for Doubler {
        type To = i32;
        fn emit(&self, input: i32) -> Self::To {
            input * 2
        }
    }

    impl TryIntake<&'static str> for Doubler {
        type To = i32;
        type Error = String;
        fn emit(&self, input: &'static str) -> Result<Self::To, Self::Error> {
            input
                .parse::<i32>()
                .map(|value| value * 2)
                .map_err(|_| format!("not a number: {input}"))
        }
    }

    struct Labeler;

    impl Exhaust<i32> for Labeler {
        type To = String;
        fn emit(&self, input: i32) -> Self::To {
            format!("#{input}")
        }
    }

    #[tokio::test]
    async fn intake_then_present() {
        let out: Result<String, ()> = Controller::new(Doubler, Labeler)
            .intake(4)
            .handle(|value| async move { Ok(value + 1) })
            .await;
        assert_eq!(out, Ok("#9".to_string()));
    }

    #[tokio::test]
    async fn rejected_intake_skips_handler() {
        let rejected = Controller::<_, _, &'static str, i32, i32>::new(Doubler, Labeler)
            .try_intake("four")
            .err();
        assert_eq!(rejected, Some("not a number: four".to_string()));
    }

    #[tokio::test]
    async fn bypass_presents_service_result() {
        let out: Result<String, ()> = Controller::new((), Labeler)
            .bypass(|| async { Ok(3) })
            .await;
        assert_eq!(out, Ok("#3".to_string()));
    }
}
