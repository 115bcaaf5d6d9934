use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::core::{build_request, child_scope, resolve_url};
use crate::data::{
    ErrorState, Invocation, Meta, MutationConfig, MutationState, Payload, RequestOptions,
    Response, Scope, States,
};
use crate::effects::transport::Transport;
use crate::error::{Error, Result};

/// One mutation slot: a definition bound to a scope and a transport, plus
/// the lifecycle state of its invocations.
///
/// Every call to [`Mutation::mutate`] publishes `loading = true` (clearing
/// any previous error) and then, once the transport answers, exactly one
/// terminal state. Observers can poll [`Mutation::states`] or watch
/// [`Mutation::subscribe`].
///
/// # Concurrent invocations
///
/// `mutate` takes `&self`, and overlapping calls on one slot are neither
/// queued nor excluded. Each call publishes independently and the last
/// publication wins, so a slow earlier failure can overwrite a fast later
/// success. Callers that need ordering must serialize their calls.
pub struct Mutation<T: Transport> {
    transport: T,
    scope: Scope,
    config: MutationConfig,
    state: watch::Sender<MutationState>,
}

impl<T: Transport> Mutation<T> {
    pub fn new(transport: T, scope: Scope, config: MutationConfig) -> Self {
        let (state, _) = watch::channel(MutationState::default());
        Self {
            transport,
            scope,
            config,
            state,
        }
    }

    pub fn config(&self) -> &MutationConfig { &self.config }

    pub fn scope(&self) -> &Scope { &self.scope }

    /// Scope for mutations defined underneath this one.
    pub fn child_scope(&self) -> Scope { child_scope(&self.scope, &self.config) }

    /// Snapshot of the full slot state.
    pub fn state(&self) -> MutationState { self.state.borrow().clone() }

    pub fn states(&self) -> States {
        let state = self.state.borrow();
        States {
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    /// Metadata for the *next* invocation, recomputed from the current
    /// configuration rather than from any call in flight.
    pub fn meta(&self) -> Meta {
        Meta {
            response: self.state.borrow().response.clone(),
            absolute_path: resolve_url(&self.scope, &self.config),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<MutationState> { self.state.subscribe() }

    /// Return the slot to its initial state. Dispatch failures leave
    /// `loading` set; callers that handle them reset here.
    pub fn reset(&self) {
        self.state.send_replace(MutationState::default());
    }

    /// Run one invocation.
    ///
    /// `payload` is the resource identifier for DELETE and the request body
    /// for the other verbs. `overrides` is layered over the scope and
    /// call-site options.
    ///
    /// # Errors
    ///
    /// - [`Error::Status`] with the raw response for non-2xx answers; the
    ///   published state carries the parsed [`ErrorState`] at the same time.
    /// - [`Error::Options`] if the scope's options provider fails.
    /// - [`Error::Transport`] if the request could not be completed.
    ///
    /// The last two leave `loading` set in the published state.
    pub async fn mutate(
        &self,
        payload: Option<Payload>,
        overrides: Option<&RequestOptions>,
    ) -> Result<Response> {
        self.publish(|state| {
            state.loading = true;
            state.error = None;
        });

        let ambient = self.scope.request_options.resolve().map_err(Error::Options)?;
        let url = resolve_url(&self.scope, &self.config);
        let invocation = Invocation::new(self.config.verb, payload);
        let request = build_request(
            &url,
            &invocation,
            &ambient,
            &self.config.request_options,
            overrides,
        );

        debug!(method = %request.method, url = %request.url, "dispatching mutation");
        let response = self
            .transport
            .send(&request)
            .await
            .map_err(|e| Error::Transport(Box::new(e)))?;

        if !response.is_ok() {
            let error = ErrorState::from_response(&response);
            warn!(
                method = %request.method,
                url = %request.url,
                status = response.status,
                "mutation failed"
            );
            self.publish(|state| {
                state.loading = false;
                state.error = Some(error);
            });
            return Err(Error::Status(Box::new(response)));
        }

        debug!(status = response.status, url = %request.url, "mutation succeeded");
        self.publish(|state| {
            state.loading = false;
            state.response = Some(response.clone());
        });
        Ok(response)
    }

    /// [`Mutation::mutate`] with any serializable value as the JSON payload.
    ///
    /// # Errors
    ///
    /// [`Error::Serialize`] if `value` cannot be represented as JSON; nothing
    /// is published or sent in that case. Otherwise as [`Mutation::mutate`].
    pub async fn mutate_json<B: Serialize + ?Sized>(
        &self,
        value: &B,
        overrides: Option<&RequestOptions>,
    ) -> Result<Response> {
        let payload = Payload::json(value)?;
        self.mutate(Some(payload), overrides).await
    }

    fn publish(&self, transition: impl FnOnce(&mut MutationState)) {
        self.state.send_modify(transition);
        let state = self.state.borrow();
        debug!(loading = state.loading, failed = state.error.is_some(), "mutation state published");
    }
}
