use std::sync::Arc;

use recipe_core::{
    AdjustmentType, Recipe, RecipeError, RecipeInput, RecipeInputPatch, RecipeService, Result,
    StepAdjustKind,
};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::reducer::apply;
use crate::state::{AppState, PrimaryRequest, Ticket};

const INTENT_BUFFER: usize = 32;

/// What a caller can ask of the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    SetInput(RecipeInputPatch),
    Generate,
    Adjust(AdjustmentType),
    AdjustByIngredients,
    AdjustStep {
        step_id: String,
        kind: StepAdjustKind,
    },
    DeleteIngredient {
        ingredient_id: String,
    },
    ReplaceIngredient {
        ingredient_id: String,
        name: String,
        amount: String,
    },
    SuggestAlternatives {
        ingredient_id: String,
        name: String,
    },
    Save,
    OpenSaved {
        recipe_id: String,
    },
    Reset,
    /// Re-runs whichever whole-recipe request ran last.
    Retry,
}

struct Envelope {
    intent: Intent,
    ack: oneshot::Sender<()>,
}

/// A whole-recipe call with everything it needs captured up front.
enum PrimaryJob {
    Generate(RecipeInput),
    Adjust(Recipe, AdjustmentType),
    AdjustByIngredients(Recipe),
}

/// Owns the [`AppState`] on a single task. Intents and collaborator
/// completions are applied one at a time in arrival order.
pub struct RecipeStore {
    state: AppState,
    service: Arc<dyn RecipeService>,
    next_ticket: Ticket,
    completions: mpsc::UnboundedSender<Action>,
    snapshots: watch::Sender<AppState>,
}

impl RecipeStore {
    /// Start the store on the current tokio runtime.
    pub fn spawn(service: Arc<dyn RecipeService>) -> StoreHandle {
        let (intent_tx, intent_rx) = mpsc::channel(INTENT_BUFFER);
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        let (snap_tx, snap_rx) = watch::channel(AppState::new());

        let store = Self {
            state: AppState::new(),
            service,
            next_ticket: 0,
            completions: done_tx,
            snapshots: snap_tx,
        };
        tokio::spawn(store.run(intent_rx, done_rx));

        StoreHandle {
            intents: intent_tx,
            snapshots: snap_rx,
        }
    }

    async fn run(
        mut self,
        mut intents: mpsc::Receiver<Envelope>,
        mut completions: mpsc::UnboundedReceiver<Action>,
    ) {
        info!("STORE: Started");
        loop {
            tokio::select! {
                envelope = intents.recv() => match envelope {
                    Some(Envelope { intent, ack }) => {
                        self.handle(intent);
                        let _ = ack.send(());
                    }
                    None => break,
                },
                Some(action) = completions.recv() => self.dispatch(action),
            }
        }
        info!("STORE: All handles dropped, stopping");
    }

    fn dispatch(&mut self, action: Action) {
        apply(&mut self.state, action);
        self.snapshots.send_replace(self.state.clone());
    }

    fn ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        self.next_ticket
    }

    fn handle(&mut self, intent: Intent) {
        debug!("STORE: {:?}", intent);
        match intent {
            Intent::SetInput(patch) => self.dispatch(Action::SetInput(patch)),
            Intent::Generate => self.start_primary(PrimaryRequest::Generate),
            Intent::Adjust(adjustment) => self.start_primary(PrimaryRequest::Adjust(adjustment)),
            Intent::AdjustByIngredients => self.start_primary(PrimaryRequest::AdjustByIngredients),
            Intent::Retry => match self.state.last_request {
                Some(request) => self.start_primary(request),
                None => debug!("STORE: Nothing to retry"),
            },
            Intent::AdjustStep { step_id, kind } => self.adjust_step(step_id, kind),
            Intent::DeleteIngredient { ingredient_id } => {
                self.dispatch(Action::DeleteIngredient { ingredient_id })
            }
            Intent::ReplaceIngredient {
                ingredient_id,
                name,
                amount,
            } => self.dispatch(Action::ReplaceIngredient {
                ingredient_id,
                name,
                amount,
            }),
            Intent::SuggestAlternatives {
                ingredient_id,
                name,
            } => self.suggest(ingredient_id, name),
            Intent::Save => self.dispatch(Action::SaveRecipe),
            Intent::OpenSaved { recipe_id } => self.dispatch(Action::OpenSaved { recipe_id }),
            Intent::Reset => self.dispatch(Action::Reset),
        }
    }

    fn start_primary(&mut self, request: PrimaryRequest) {
        let job = match (request, self.state.recipe.clone()) {
            (PrimaryRequest::Generate, _) => PrimaryJob::Generate(self.state.input.clone()),
            (PrimaryRequest::Adjust(adjustment), Some(recipe)) => {
                PrimaryJob::Adjust(recipe, adjustment)
            }
            (PrimaryRequest::AdjustByIngredients, Some(recipe)) => {
                PrimaryJob::AdjustByIngredients(recipe)
            }
            (_, None) => {
                debug!("STORE: {:?} ignored, no active recipe", request);
                return;
            }
        };

        let ticket = self.ticket();
        info!("STORE: {:?} started (ticket {})", request, ticket);
        self.dispatch(Action::PrimaryStart { ticket, request });

        let service = Arc::clone(&self.service);
        let done = self.completions.clone();
        tokio::spawn(async move {
            let result = match job {
                PrimaryJob::Generate(input) => service.generate(&input).await,
                PrimaryJob::Adjust(recipe, adjustment) => {
                    service.adjust_whole(&recipe, adjustment).await
                }
                PrimaryJob::AdjustByIngredients(recipe) => {
                    service.adjust_by_ingredients(&recipe).await
                }
            };
            let action = match result {
                Ok(recipe) => Action::PrimarySuccess {
                    ticket,
                    recipe: recipe.freshened(),
                },
                Err(e) => {
                    warn!("STORE: {:?} failed: {}", request, e);
                    Action::PrimaryError {
                        ticket,
                        message: e.to_string(),
                    }
                }
            };
            let _ = done.send(action);
        });
    }

    fn adjust_step(&mut self, step_id: String, kind: StepAdjustKind) {
        let Some(step) = self
            .state
            .recipe
            .as_ref()
            .and_then(|r| r.step(&step_id))
            .cloned()
        else {
            debug!("STORE: Unknown step {}", step_id);
            return;
        };

        if self
            .state
            .step_adjustment(&step_id)
            .is_some_and(|a| a.kind == kind && !a.loading)
        {
            self.dispatch(Action::StepAdjustClear { step_id });
            return;
        }

        let ticket = self.ticket();
        self.dispatch(Action::StepAdjustStart {
            ticket,
            step_id: step_id.clone(),
            kind,
        });

        let service = Arc::clone(&self.service);
        let done = self.completions.clone();
        tokio::spawn(async move {
            let action = match service.adjust_step(&step, kind).await {
                Ok(content) => Action::StepAdjustSuccess {
                    ticket,
                    step_id,
                    content,
                },
                Err(e) => {
                    warn!("STORE: Step {} {:?} failed: {}", step_id, kind, e);
                    Action::StepAdjustFailed { ticket, step_id }
                }
            };
            let _ = done.send(action);
        });
    }

    fn suggest(&mut self, ingredient_id: String, name: String) {
        if self.state.suggestions_for(&ingredient_id).is_some() {
            self.dispatch(Action::SuggestClear { ingredient_id });
            return;
        }

        let ticket = self.ticket();
        self.dispatch(Action::SuggestStart {
            ticket,
            ingredient_id: ingredient_id.clone(),
        });

        let service = Arc::clone(&self.service);
        let done = self.completions.clone();
        tokio::spawn(async move {
            let action = match service.suggest_substitutes(&name).await {
                Ok(suggestions) => Action::SuggestSuccess {
                    ticket,
                    ingredient_id,
                    suggestions,
                },
                Err(e) => {
                    warn!("STORE: Substitutes for '{}' failed: {}", name, e);
                    Action::SuggestFailed {
                        ticket,
                        ingredient_id,
                    }
                }
            };
            let _ = done.send(action);
        });
    }
}

/// Cheap, cloneable front door to a running [`RecipeStore`].
///
/// Each intent method returns once the store has applied the intent's
/// synchronous transition; collaborator results land later and show up
/// through [`StoreHandle::subscribe`] or [`StoreHandle::settled`].
#[derive(Clone)]
pub struct StoreHandle {
    intents: mpsc::Sender<Envelope>,
    snapshots: watch::Receiver<AppState>,
}

impl StoreHandle {
    pub async fn send(&self, intent: Intent) -> Result<()> {
        let (ack, acked) = oneshot::channel();
        self.intents
            .send(Envelope { intent, ack })
            .await
            .map_err(|_| RecipeError::StoreClosed)?;
        acked.await.map_err(|_| RecipeError::StoreClosed)
    }

    pub async fn set_input(&self, patch: RecipeInputPatch) -> Result<()> {
        self.send(Intent::SetInput(patch)).await
    }

    pub async fn generate(&self) -> Result<()> {
        self.send(Intent::Generate).await
    }

    pub async fn adjust(&self, adjustment: AdjustmentType) -> Result<()> {
        self.send(Intent::Adjust(adjustment)).await
    }

    pub async fn adjust_by_ingredients(&self) -> Result<()> {
        self.send(Intent::AdjustByIngredients).await
    }

    pub async fn adjust_step(&self, step_id: impl Into<String>, kind: StepAdjustKind) -> Result<()> {
        self.send(Intent::AdjustStep {
            step_id: step_id.into(),
            kind,
        })
        .await
    }

    pub async fn delete_ingredient(&self, ingredient_id: impl Into<String>) -> Result<()> {
        self.send(Intent::DeleteIngredient {
            ingredient_id: ingredient_id.into(),
        })
        .await
    }

    pub async fn replace_ingredient(
        &self,
        ingredient_id: impl Into<String>,
        name: impl Into<String>,
        amount: impl Into<String>,
    ) -> Result<()> {
        self.send(Intent::ReplaceIngredient {
            ingredient_id: ingredient_id.into(),
            name: name.into(),
            amount: amount.into(),
        })
        .await
    }

    pub async fn suggest_alternatives(
        &self,
        ingredient_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<()> {
        self.send(Intent::SuggestAlternatives {
            ingredient_id: ingredient_id.into(),
            name: name.into(),
        })
        .await
    }

    pub async fn save(&self) -> Result<()> {
        self.send(Intent::Save).await
    }

    pub async fn open_saved(&self, recipe_id: impl Into<String>) -> Result<()> {
        self.send(Intent::OpenSaved {
            recipe_id: recipe_id.into(),
        })
        .await
    }

    pub async fn reset(&self) -> Result<()> {
        self.send(Intent::Reset).await
    }

    pub async fn retry(&self) -> Result<()> {
        self.send(Intent::Retry).await
    }

    pub fn snapshot(&self) -> AppState {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.snapshots.clone()
    }

    /// Wait for the first snapshot satisfying `pred`, including the current one.
    pub async fn wait_for(&self, pred: impl FnMut(&AppState) -> bool) -> Result<AppState> {
        let mut rx = self.snapshots.clone();
        let state = rx
            .wait_for(pred)
            .await
            .map_err(|_| RecipeError::StoreClosed)?;
        Ok(state.clone())
    }

    /// Wait until no collaborator call is outstanding.
    pub async fn settled(&self) -> Result<AppState> {
        self.wait_for(|s| !s.is_busy()).await
    }
}
