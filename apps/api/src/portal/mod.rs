// Portal API: the dashboards each role sees and the intents they can issue.
// Services own ids, dates and AI calls; the store owns the transitions.

pub mod handlers;
pub mod services;
