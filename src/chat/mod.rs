// Response composer
//
// Orchestrates the triage pipeline for each message:
// classify -> generate -> augment -> persist -> respond.

mod session;
pub mod texts;

pub use session::{SessionManager, SessionState};

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::Config;
use crate::generator::{ChatTurn, OllamaGenerator, TextGenerator};
use crate::store::{ConversationStore, ConversationTurn};
use crate::triage::{
    crisis_resources, interventions, technique_for, CrisisDetector, EmotionAnalyzer,
    EmotionCategory, SeverityLevel,
};

/// Default session inactivity timeout.
const SESSION_TIMEOUT_MINUTES: u64 = 30;

/// Structured result of processing one message.
#[derive(Debug, Clone, Serialize)]
pub struct TriageOutcome {
    /// Composed reply text
    pub reply: String,
    /// Primary emotion detected in the message
    pub emotion: EmotionCategory,
    /// Emotion confidence in [0, 1]
    pub confidence: f32,
    /// Crisis severity tier of the message
    pub severity: SeverityLevel,
    /// Crisis keywords that matched
    pub matched_terms: Vec<String>,
    /// Emotion counts over the session's rolling history
    pub trend: BTreeMap<EmotionCategory, usize>,
}

/// The wellness chatbot: classifiers, store, sessions, and generator.
pub struct Chatbot {
    crisis: CrisisDetector,
    emotions: EmotionAnalyzer,
    store: ConversationStore,
    sessions: SessionManager,
    generator: Arc<dyn TextGenerator>,
    confidence_threshold: f32,
    context_turns: usize,
}

impl Chatbot {
    /// Create a chatbot with default classifiers around the given generator.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            crisis: CrisisDetector::default(),
            emotions: EmotionAnalyzer::new(),
            store: ConversationStore::new(),
            sessions: SessionManager::new(SESSION_TIMEOUT_MINUTES),
            generator,
            confidence_threshold: 0.6,
            context_turns: 3,
        }
    }

    /// Create a chatbot from configuration, backed by an Ollama generator.
    pub fn from_config(config: &Config) -> Result<Self> {
        let generator: Arc<dyn TextGenerator> = Arc::new(OllamaGenerator::new(&config.ollama)?);

        let crisis = match &config.triage.crisis_keywords_path {
            Some(path) => CrisisDetector::load_from_file(path)?,
            None => CrisisDetector::default(),
        };

        Ok(Self {
            crisis,
            emotions: EmotionAnalyzer::new(),
            store: ConversationStore::new(),
            sessions: SessionManager::new(SESSION_TIMEOUT_MINUTES),
            generator,
            confidence_threshold: config.triage.confidence_threshold,
            context_turns: config.triage.context_turns,
        })
    }

    /// Start a new chat session for a user.
    ///
    /// Returns the session id and the welcome message. Each call creates a
    /// distinct session with an empty emotion history.
    pub fn start_session(&self, user_id: &str) -> (String, &'static str) {
        let session_id = self.sessions.create(user_id);
        (session_id, texts::WELCOME_MESSAGE)
    }

    /// End a chat session, discarding its emotion history.
    ///
    /// Stored conversation turns outlive the session. The closing text is
    /// returned whether or not the session existed.
    pub fn end_session(&self, session_id: &str) -> &'static str {
        if self.sessions.delete(session_id) {
            tracing::info!(session_id = %session_id, "Ended session");
        }
        texts::CLOSING_MESSAGE
    }

    /// Process one user message through the full pipeline.
    ///
    /// Every path produces a reply: a failed generator call is replaced by
    /// a fixed fallback line, and vacuous classification resolves to
    /// low/neutral defaults. The only error is an unknown session id, which
    /// is the caller's concern.
    pub async fn process_message(&self, session_id: &str, message: &str) -> Result<TriageOutcome> {
        let session = self
            .sessions
            .get(session_id)
            .ok_or_else(|| anyhow::anyhow!("Unknown session: {}", session_id))?;

        // CLASSIFY: independent risk and emotion assessments, both pure
        // functions of the message text.
        let assessment = self.crisis.assess(message);
        let (emotion, confidence) = self.emotions.analyze(message);

        // Record on every turn, including neutral zero-confidence results.
        self.sessions.record_emotion(session_id, emotion);

        // GENERATE: condition the external generator on recent context.
        let context = self.build_context(session_id);
        let generated = match self
            .generator
            .generate(texts::SYSTEM_PROMPT, &context, message)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    generator = %self.generator.name(),
                    error = %e,
                    "Generation failed, using fallback reply"
                );
                texts::FALLBACK_REPLY.to_string()
            }
        };

        // AUGMENT: crisis preamble for elevated severity, otherwise an
        // intervention script when confidence clears the threshold.
        let mut reply = match assessment.severity {
            SeverityLevel::Critical | SeverityLevel::High => {
                format!("{}\n\n{}", crisis_preamble(assessment.severity), generated)
            }
            SeverityLevel::Moderate | SeverityLevel::Low => {
                let mut reply = generated;
                if confidence > self.confidence_threshold {
                    if let Some(script) = technique_for(emotion) {
                        reply.push_str("\n\n");
                        reply.push_str(script);
                    }
                }
                reply
            }
        };

        // Safety check-in for moderate and high only. Critical replies
        // already demand immediate action; low replies don't warrant it.
        if matches!(
            assessment.severity,
            SeverityLevel::Moderate | SeverityLevel::High
        ) {
            reply.push_str("\n\n");
            reply.push_str(texts::SAFETY_CHECK_IN);
        }

        // PERSIST
        self.store.append(ConversationTurn {
            session_id: session_id.to_string(),
            user_id: session.user_id.clone(),
            timestamp: Utc::now(),
            message: message.to_string(),
            reply: reply.clone(),
            emotion,
            severity: assessment.severity,
        });

        // RESPOND, with one structured event per turn for telemetry.
        tracing::info!(
            session_id = %session_id,
            severity = %assessment.severity,
            emotion = %emotion,
            confidence = confidence,
            "Processed message"
        );

        Ok(TriageOutcome {
            reply,
            emotion,
            confidence,
            severity: assessment.severity,
            matched_terms: assessment.matched_terms,
            trend: self.sessions.emotion_trend(session_id),
        })
    }

    /// Expand recent stored turns into alternating user/assistant entries.
    fn build_context(&self, session_id: &str) -> Vec<ChatTurn> {
        let turns = self.store.recent_context(session_id, self.context_turns);
        let mut context = Vec::with_capacity(turns.len() * 2);
        for turn in turns {
            context.push(ChatTurn::user(turn.message));
            context.push(ChatTurn::assistant(turn.reply));
        }
        context
    }

    pub fn session_manager(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }
}

/// Build the crisis preamble for a critical or high severity reply.
///
/// Critical: supportive message, helplines, then the 4-step safety plan.
/// High: supportive message, grounding exercise, then support lines.
fn crisis_preamble(severity: SeverityLevel) -> String {
    let bundle = crisis_resources(severity);
    let helplines = bundle
        .helplines
        .iter()
        .map(|h| format!("\u{2022} {}: {}", h.name, h.number))
        .collect::<Vec<_>>()
        .join("\n");

    match severity {
        SeverityLevel::Critical => format!(
            "{}\n\n**Immediate Support Available:**\n{}\n\n{}",
            bundle.message,
            helplines,
            texts::SAFETY_PLAN
        ),
        _ => format!(
            "{}\n\n{}\n\n**Support Lines:**\n{}",
            bundle.message,
            interventions::GROUNDING_EXERCISE,
            helplines
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GeneratorError;
    use async_trait::async_trait;

    /// Scripted generator: returns a fixed line, or fails when told to.
    struct ScriptedGenerator {
        reply: &'static str,
        fail: bool,
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(
            &self,
            _system_prompt: &str,
            _context: &[ChatTurn],
            _user_text: &str,
        ) -> Result<String, GeneratorError> {
            if self.fail {
                Err(GeneratorError::Decode("scripted failure".to_string()))
            } else {
                Ok(self.reply.to_string())
            }
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn chatbot(reply: &'static str) -> Chatbot {
        Chatbot::new(Arc::new(ScriptedGenerator { reply, fail: false }))
    }

    #[test]
    fn test_critical_preamble_contents() {
        let preamble = crisis_preamble(SeverityLevel::Critical);
        assert!(preamble.starts_with("I'm deeply concerned"));
        assert!(preamble.contains("**Immediate Support Available:**"));
        assert!(preamble.contains("AASRA: 9820466726"));
        assert!(preamble.contains("**Safety Plan:**"));
        assert!(preamble.contains("4. Focus on getting through the next hour"));
    }

    #[test]
    fn test_high_preamble_contents() {
        let preamble = crisis_preamble(SeverityLevel::High);
        assert!(preamble.starts_with("I can see you're going through"));
        assert!(preamble.contains("grounding exercise"));
        assert!(preamble.contains("**Support Lines:**"));
        assert!(preamble.contains("iCALL: 9152987821"));
        // The safety plan belongs to critical replies only.
        assert!(!preamble.contains("**Safety Plan:**"));
    }

    #[tokio::test]
    async fn test_unknown_session_is_an_error() {
        let bot = chatbot("generated");
        let result = bot.process_message("missing", "hello").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_generator_failure_uses_fallback() {
        let bot = Chatbot::new(Arc::new(ScriptedGenerator {
            reply: "",
            fail: true,
        }));
        let (session_id, _) = bot.start_session("student-1");

        let outcome = bot.process_message(&session_id, "hello").await.unwrap();
        assert_eq!(outcome.reply, texts::FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_context_alternates_user_assistant() {
        let bot = chatbot("generated reply");
        let (session_id, _) = bot.start_session("student-1");

        bot.process_message(&session_id, "first").await.unwrap();
        bot.process_message(&session_id, "second").await.unwrap();

        let context = bot.build_context(&session_id);
        assert_eq!(context.len(), 4);
        assert_eq!(context[0].text, "first");
        assert_eq!(context[1].text, "generated reply");
        assert_eq!(context[2].text, "second");
    }

    #[tokio::test]
    async fn test_trend_includes_current_turn() {
        let bot = chatbot("generated");
        let (session_id, _) = bot.start_session("student-1");

        let outcome = bot
            .process_message(&session_id, "feeling hopeful today")
            .await
            .unwrap();
        assert_eq!(outcome.trend[&EmotionCategory::Hopeful], 1);
    }
}
