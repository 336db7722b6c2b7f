//! Instruction text sent to the completion backend.
//!
//! The style rules here (one question per reply, short replies, short
//! expected answers) are requests to the model; nothing enforces them.

use std::fmt::Write;

use super::InterviewPhase;
use crate::domain::candidate::{CandidateField, ExperienceLevel, YearsOfExperience};

/// First assistant turn of every session.
pub const GREETING: &str = "👋 Hello! Welcome to TalentScout's AI Hiring Assistant!

I'm here to conduct your technical interview for a software development position.

During our structured interview, I will:
• Gather your professional information and background
• Assess your technical skills through targeted questions
• Discuss your experience and project work
• Explore cultural fit and answer your questions

Let's start by getting to know you better! Could you please tell me your full name?";

/// Reply to blank input. Nothing is logged for it.
pub const EMPTY_INPUT_REPLY: &str = "I didn't receive any input. Could you please tell me more?";

/// Assistant turn substituted for a failed completion.
pub fn apology(detail: &str) -> String {
    format!(
        "I apologize, but I'm experiencing a technical issue. Could you please repeat your response? (Error: {})",
        detail
    )
}

/// Session facts interpolated into the system prompt.
#[derive(Debug, Clone)]
pub struct PromptContext<'a> {
    pub phase: InterviewPhase,
    pub missing: &'a [CandidateField],
    pub technical_questions_asked: u32,
    pub max_technical_questions: u32,
    pub tech_stack: Option<String>,
    pub experience: Option<YearsOfExperience>,
}

fn field_list(fields: &[CandidateField]) -> String {
    let keys: Vec<&str> = fields.iter().map(|f| f.key()).collect();
    format!("[{}]", keys.join(", "))
}

/// Full system prompt: role, required fields, live status, style rules and
/// the instruction for the current phase.
pub fn system_prompt(ctx: &PromptContext<'_>) -> String {
    let missing = field_list(ctx.missing);
    let mut prompt = String::from(
        "You are TalentScout, an expert AI hiring assistant conducting a CONVERSATIONAL technical interview for a software development position.\n\n\
         CRITICAL INFORMATION GATHERING RULE\n\
         You MUST collect ALL required candidate information before proceeding to technical questions.\n\n\
         REQUIRED CANDIDATE INFORMATION (MUST COLLECT ALL):\n",
    );
    for field in CandidateField::ALL {
        let _ = writeln!(prompt, "- {}: {}", field.key(), field.description());
    }

    let _ = write!(
        prompt,
        "\nCURRENT STATUS:\n\
         - Interview Phase: {}\n\
         - Missing Information: {}\n\
         - Technical Questions Asked: {}/{}\n\n",
        ctx.phase, missing, ctx.technical_questions_asked, ctx.max_technical_questions
    );

    prompt.push_str(
        "CONVERSATIONAL INTERVIEW STYLE:\n\
         1. INFORMATION FIRST: If ANY required information is missing, ask for it before technical questions\n\
         2. ONE QUESTION ONLY: Ask exactly ONE question per response - never multiple questions\n\
         3. KEEP IT SHORT: Your responses should be 1-2 sentences maximum\n\
         4. EXPECT SHORT ANSWERS: Candidates should give 30-50 word responses, not essays\n\
         5. BE CONVERSATIONAL: Sound friendly and natural, like chatting with a colleague\n\
         6. BRIEF ACKNOWLEDGMENT: Quick \"Great!\" or \"Perfect!\" before next question\n\n\
         TECHNICAL QUESTION GUIDELINES:\n\
         - Ask ONE specific, focused question at a time\n\
         - Make it practical: \"How do you handle...\" rather than \"Explain everything about...\"\n\
         - Expect concise answers (30-50 words)\n\
         - Follow up naturally based on their response\n\
         - Avoid complex multi-part questions\n\n",
    );

    let _ = write!(
        prompt,
        "CURRENT PHASE FOCUS:\n{}\n\n",
        phase_instructions(ctx)
    );

    prompt.push_str(
        "CONVERSATION EXAMPLES:\n\
         GOOD: \"Great! What's your email address?\"\n\
         GOOD: \"Perfect! How many years of experience do you have?\"\n\
         GOOD: \"Nice! How do you usually handle API rate limits?\"\n\
         BAD: \"Can you tell me about your experience with APIs, error handling, and also your projects?\"\n\
         BAD: Asking multiple questions in one response\n\
         BAD: Long responses expecting detailed explanations\n\n\
         REMEMBER: Keep it conversational, ONE question at a time, expect SHORT answers!\n",
    );
    let _ = write!(prompt, "Missing fields to collect: {}", missing);

    prompt
}

/// Instruction block for the current phase.
pub fn phase_instructions(ctx: &PromptContext<'_>) -> String {
    let missing = field_list(ctx.missing);
    match ctx.phase {
        InterviewPhase::Greeting => format!(
            "Welcome briefly and ask for their full name to start.\n\
             Keep it short: 1-2 sentences maximum.\n\
             Missing fields: {}",
            missing
        ),
        InterviewPhase::InformationGathering => format!(
            "PRIORITY: Collect ALL missing candidate information systematically.\n\
             Missing fields that MUST be collected: {}\n\
             - Ask for ONE missing field at a time conversationally\n\
             - Keep questions short: \"Great! What's your email?\" or \"Perfect! How many years of experience?\"\n\
             - Brief acknowledgment, then one focused question\n\
             - DO NOT move to technical questions until ALL fields are complete",
            missing
        ),
        InterviewPhase::TechnicalAssessment => {
            let remaining = ctx
                .max_technical_questions
                .saturating_sub(ctx.technical_questions_asked);
            let tech_stack = ctx.tech_stack.as_deref().unwrap_or("not specified yet");
            let experience = match ctx.experience {
                Some(years) => format!(
                    "{} ({})",
                    years,
                    ExperienceLevel::from_years(years.years())
                ),
                None => "unknown".to_string(),
            };
            format!(
                "Now ask SHORT, focused technical questions based on their tech stack: {}\n\
                 - Ask {} more technical questions, ONE at a time\n\
                 - Keep questions specific and practical: \"How do you handle API timeouts?\"\n\
                 - Expect 30-50 word answers, not essays\n\
                 - Follow up naturally based on their response\n\
                 - Adjust difficulty for {} experience level",
                tech_stack, remaining, experience
            )
        }
        InterviewPhase::ExperienceDiscussion => "Ask SHORT questions about their professional experience.\n\
             Example: \"What's been your most challenging project?\" - expect brief answers."
            .to_string(),
        InterviewPhase::ProjectDeepDive => "Ask ONE focused question about their key project.\n\
             Example: \"What was the trickiest technical decision you made?\" - keep it conversational."
            .to_string(),
        InterviewPhase::CulturalFit => "Ask brief questions about work style and fit.\n\
             Example: \"How do you prefer to work in a team?\" - expect short responses."
            .to_string(),
        InterviewPhase::CandidateQuestions => "Ask: \"Do you have any questions about the role or company?\"\n\
             Keep responses brief and helpful."
            .to_string(),
        InterviewPhase::NextSteps => "Briefly explain next steps and thank them.\n\
             Keep it short and professional."
            .to_string(),
        InterviewPhase::Completed => "Continue the interview professionally.".to_string(),
    }
}
