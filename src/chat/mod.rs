//! Chat relay between the user, the assistant, and the task client
//!
//! The assistant lives on the server. It answers each message with either a
//! plain reply or a named action whose task references are 1-based display
//! numbers. This module turns those replies into `TaskClient` calls and keeps
//! the chat transcript.

use serde_json::Value;
use tracing::{debug, error};

use crate::api::{AssistantReply, TaskApi};
use crate::client::view::list_rows;
use crate::client::{Refresh, TaskClient};

/// Assistant reply, decoded into the actions this client understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantAction {
    AddTask {
        description: String,
        reminder: Option<String>,
    },
    ViewTasks,
    CompleteTask {
        task_number: Option<usize>,
    },
    DeleteTask {
        task_number: Option<usize>,
    },
    UndoDelete,
    ResetAll,
    Reply(String),
    Unknown {
        reply: Option<String>,
    },
}

impl AssistantAction {
    pub fn from_reply(reply: AssistantReply) -> Self {
        let AssistantReply {
            function,
            arguments,
            reply,
        } = reply;
        let args = arguments.unwrap_or(Value::Null);

        let Some(function) = function else {
            return match reply {
                Some(text) => AssistantAction::Reply(text),
                None => AssistantAction::Unknown { reply: None },
            };
        };

        match function.as_str() {
            "addTask" => AssistantAction::AddTask {
                description: args
                    .get("description")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                reminder: args
                    .get("reminder")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|r| !r.is_empty() && !r.eq_ignore_ascii_case("null"))
                    .map(str::to_string),
            },
            "viewTasks" => AssistantAction::ViewTasks,
            "completeTask" => AssistantAction::CompleteTask {
                task_number: task_number(&args),
            },
            "deleteTask" => AssistantAction::DeleteTask {
                task_number: task_number(&args),
            },
            "undoDelete" => AssistantAction::UndoDelete,
            "resetAll" => AssistantAction::ResetAll,
            other => {
                debug!("Unknown assistant function: {}", other);
                AssistantAction::Unknown { reply }
            }
        }
    }
}

fn task_number(args: &Value) -> Option<usize> {
    match args.get("task_number")? {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    You,
    Assistant,
    Notice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub speaker: Speaker,
    pub text: String,
}

/// What the front end still has to do after a relayed exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Followup {
    Nothing,
    /// The assistant asked to delete every task; confirm with the user first
    ConfirmReset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatOutcome {
    pub refresh: Refresh,
    pub followup: Followup,
}

impl ChatOutcome {
    const IDLE: ChatOutcome = ChatOutcome {
        refresh: Refresh::NONE,
        followup: Followup::Nothing,
    };
}

const GENERIC_FAILURE: &str = "Sorry, something went wrong talking to the assistant.";

#[derive(Debug, Default)]
pub struct ChatRelay {
    transcript: Vec<ChatLine>,
}

impl ChatRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[ChatLine] {
        &self.transcript
    }

    fn push(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.transcript.push(ChatLine {
            speaker,
            text: text.into(),
        });
    }

    /// Relay one message and act on the assistant's answer
    pub async fn send<A: TaskApi>(
        &mut self,
        message: &str,
        client: &mut TaskClient<A>,
    ) -> ChatOutcome {
        let message = message.trim();
        if message.is_empty() {
            return ChatOutcome::IDLE;
        }
        self.push(Speaker::You, message);

        let reply = match client.api().chat(message).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Chat request failed: {}", e);
                self.push(Speaker::Notice, GENERIC_FAILURE);
                return ChatOutcome::IDLE;
            }
        };

        let action = AssistantAction::from_reply(reply);
        debug!("Assistant action: {:?}", action);
        let followup = self.dispatch(action, client).await;

        ChatOutcome {
            refresh: Refresh::ALL,
            followup,
        }
    }

    async fn dispatch<A: TaskApi>(
        &mut self,
        action: AssistantAction,
        client: &mut TaskClient<A>,
    ) -> Followup {
        match action {
            AssistantAction::Reply(text) => {
                self.push(Speaker::Assistant, text);
            }
            AssistantAction::Unknown { reply } => {
                if let Some(text) = reply {
                    self.push(Speaker::Assistant, text);
                }
            }
            AssistantAction::AddTask {
                description,
                reminder,
            } => {
                if description.is_empty() {
                    self.push(Speaker::Notice, "I didn't catch a description for that task.");
                } else if client.create(&description, reminder).await.any() {
                    self.push(Speaker::Assistant, format!("Added task: {}", description));
                } else {
                    self.push(Speaker::Notice, "Could not add that task.");
                }
            }
            AssistantAction::ViewTasks => {
                let rows = list_rows(client.tasks());
                if rows.is_empty() {
                    self.push(Speaker::Assistant, "You have no tasks.");
                } else {
                    self.push(Speaker::Assistant, "Here are your tasks:");
                    for row in rows {
                        let mut line = format!(
                            "{}. {}{}",
                            row.position,
                            row.description,
                            if row.completed { " [done]" } else { "" }
                        );
                        if let Some(reminder) = &row.reminder {
                            line.push_str(&format!(" ({})", reminder));
                        }
                        self.push(Speaker::Assistant, line);
                    }
                }
            }
            AssistantAction::CompleteTask { task_number } => {
                let Some((number, id)) = self.resolve(task_number, client) else {
                    return Followup::Nothing;
                };
                if client.set_completed(id, true).await.any() {
                    self.push(
                        Speaker::Assistant,
                        format!("Marked task {} as complete.", number),
                    );
                } else {
                    self.push(Speaker::Notice, format!("Could not complete task {}.", number));
                }
            }
            AssistantAction::DeleteTask { task_number } => {
                let Some((number, id)) = self.resolve(task_number, client) else {
                    return Followup::Nothing;
                };
                if client.remove(id).await.any() {
                    self.push(Speaker::Assistant, format!("Deleted task {}.", number));
                } else {
                    self.push(Speaker::Notice, format!("Could not delete task {}.", number));
                }
            }
            AssistantAction::UndoDelete => {
                if client.undo_delete().await.any() {
                    self.push(Speaker::Assistant, "Restored the last deleted task.");
                } else {
                    self.push(Speaker::Notice, "There is nothing to undo.");
                }
            }
            AssistantAction::ResetAll => {
                self.push(Speaker::Assistant, "Confirm to delete all tasks.");
                return Followup::ConfirmReset;
            }
        }

        Followup::Nothing
    }

    /// Translate a display number into a real id, warning in the transcript
    /// when it does not name a task.
    fn resolve<A: TaskApi>(
        &mut self,
        task_number: Option<usize>,
        client: &TaskClient<A>,
    ) -> Option<(usize, crate::task::TaskId)> {
        let Some(number) = task_number else {
            self.push(Speaker::Notice, "Please give a valid task number.");
            return None;
        };
        match client.id_for_display_number(number) {
            Some(id) => Some((number, id)),
            None => {
                self.push(
                    Speaker::Notice,
                    format!(
                        "Task {} does not exist. You have {} task(s).",
                        number,
                        client.tasks().len()
                    ),
                );
                None
            }
        }
    }

    /// Record the outcome of a reset the user confirmed or declined
    pub fn record_reset(&mut self, performed: bool) {
        if performed {
            self.push(Speaker::Assistant, "All tasks cleared.");
        } else {
            self.push(Speaker::Notice, "Reset cancelled.");
        }
    }
}
