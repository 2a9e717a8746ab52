//! Fixed AI prompts and per-feature completion parameters
//!
//! Prompt text is part of the product surface: tests pin the templates so an
//! accidental edit shows up as a diff, not a silent behavior change. User
//! input is clamped before it reaches a prompt.

use lextrack_core::model::activity::clamp_chars;
use lextrack_core_types::Sensitive;

/// Hard cap on user text interpolated into any prompt
pub const PROMPT_INPUT_CHARS: usize = 15_000;

/// Everything a completion backend needs for one call
///
/// The user message carries free text (party names, judgment text), so it is
/// wrapped in [`Sensitive`]: debug-printing a request never leaks it.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub user: Sensitive<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

const NOTICE_SYSTEM: &str = "You are a legal expert specializing in drafting formal legal notices under Indian law. Generate professional legal notices with:
- Proper legal formatting and structure
- Formal legal language appropriate for Indian courts
- Reference to relevant Indian laws and sections
- Clear demands and timelines
- Professional closing with advocate details placeholder

Do not use asterisks for formatting. Use proper headings and paragraphs.";

const RESEARCH_SYSTEM: &str = "You are a legal research expert specializing in Indian law. Provide comprehensive, accurate legal analysis including:
- Relevant statutory provisions (IPC, CrPC, CPC, Constitution, NI Act, etc.)
- Key case laws and precedents with citations
- Legal principles and interpretations
- Practical implications for lawyers

Format your response clearly with sections. Be specific and cite actual sections/cases.";

const SUMMARIZER_SYSTEM: &str = "You are a legal expert specializing in summarizing Indian court judgments and legal documents.

Provide a structured summary with:
1. **Case Overview**: Brief facts and parties
2. **Key Issues**: Legal questions addressed
3. **Ratio Decidendi**: Core legal reasoning
4. **Final Order**: Judgment/decision
5. **Applicable Sections**: Relevant laws cited
6. **Practical Implications**: How this affects similar cases

Be concise but comprehensive. Use Indian legal terminology.";

/// Free-form fields a notice prompt is assembled from
#[derive(Debug, Clone, Default)]
pub struct NoticeInput {
    pub notice_type: Option<String>,
    pub recipient: String,
    pub recipient_address: Option<String>,
    pub subject: String,
    pub amount: Option<String>,
    pub due_date: Option<String>,
    pub details: Option<String>,
}

/// Build the notice-generation request
///
/// `case_reference` is the optional owned-case enrichment line, e.g.
/// `Case Reference: State vs. Rao (CNR: DLHC01...)`.
pub fn notice_request(input: &NoticeInput, case_reference: Option<&str>) -> CompletionRequest {
    let mut context = format!(
        "Notice Type: {}\nRecipient: {}\n",
        input.notice_type.as_deref().unwrap_or("Legal Notice"),
        input.recipient,
    );
    if let Some(address) = &input.recipient_address {
        context.push_str(&format!("Address: {address}\n"));
    }
    context.push_str(&format!("Subject: {}\n", input.subject));
    if let Some(amount) = &input.amount {
        context.push_str(&format!("Amount: \u{20b9}{amount}\n"));
    }
    if let Some(due_date) = &input.due_date {
        context.push_str(&format!("Due Date: {due_date}\n"));
    }
    if let Some(details) = &input.details {
        context.push_str(&format!(
            "Additional Details: {}\n",
            clamp_chars(details, PROMPT_INPUT_CHARS)
        ));
    }
    if let Some(reference) = case_reference {
        context.push_str(&format!("\n{reference}"));
    }

    CompletionRequest {
        system: NOTICE_SYSTEM.to_string(),
        user: Sensitive::new(format!(
            "Generate a professional legal notice:\n\n{context}\n\nFormat it as a formal legal notice ready to be sent."
        )),
        max_tokens: 2000,
        temperature: 0.3,
    }
}

/// Build the research request
///
/// `case_context` is the optional owned-case enrichment appended to the
/// system prompt, e.g. `[Research Context: Case "State vs. Rao", Type:
/// CRIMINAL, Court: Delhi High Court]`.
pub fn research_request(query: &str, case_context: Option<&str>) -> CompletionRequest {
    let mut system = RESEARCH_SYSTEM.to_string();
    if let Some(ctx) = case_context {
        system.push_str("\n\n");
        system.push_str(ctx);
    }

    CompletionRequest {
        system,
        user: Sensitive::new(format!("Provide detailed legal research on: \"{query}\"")),
        max_tokens: 2000,
        temperature: 0.5,
    }
}

/// Build the summarizer request; source text is clamped to 15,000 chars
pub fn summarizer_request(title: &str, text: &str) -> CompletionRequest {
    CompletionRequest {
        system: SUMMARIZER_SYSTEM.to_string(),
        user: Sensitive::new(format!(
            "Summarize this legal document titled \"{title}\":\n\n{}",
            clamp_chars(text, PROMPT_INPUT_CHARS)
        )),
        max_tokens: 1500,
        temperature: 0.3,
    }
}
