//! Handles for talking to the store actor.

/// Generate client methods with oneshot channel boilerplate and automatic tracing.
/// A closed or dropped actor surfaces as `StoreError::ActorCommunicationError`.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $crate::error::StoreError> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender
                    .send($request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| $crate::error::StoreError::ActorCommunicationError("Store closed".to_string()))?;

                response
                    .await
                    .map_err(|_| $crate::error::StoreError::ActorCommunicationError("Store dropped".to_string()))?
            }
        }
    };
}

mod store_client;

pub use store_client::*;
