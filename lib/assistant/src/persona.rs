//! Sales-rep persona assembly.
//!
//! A demo assistant is an off-the-shelf model configured entirely through
//! its instructions: who it claims to be, the opening line the prospect is
//! answering, the qualification script, and the guardrails. This module
//! turns provisioning input into that instruction block.

use serde::{Deserialize, Serialize};

/// Default service the demo sells.
const DEFAULT_SERVICE: &str = "Solar services";

/// Default first name the persona signs messages with.
const DEFAULT_REP_NAME: &str = "Sarah";

/// A persona-configured demo assistant, ready to create remotely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantPersona {
    /// The company whose demo this is.
    company_name: String,
    /// The prospect the demo is personalized for.
    contact_name: String,
    /// Prospect location, if known.
    location: Option<String>,
    /// Prospect job title, if known.
    title: Option<String>,
    /// The service being sold.
    service_type: String,
    /// First name the persona presents as.
    rep_name: String,
    /// Booking link offered once the prospect qualifies.
    calendar_link: Option<String>,
}

impl AssistantPersona {
    /// Creates a persona for a company demo personalized to one prospect.
    #[must_use]
    pub fn new(company_name: impl Into<String>, contact_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            contact_name: contact_name.into(),
            location: None,
            title: None,
            service_type: DEFAULT_SERVICE.to_string(),
            rep_name: DEFAULT_REP_NAME.to_string(),
            calendar_link: None,
        }
    }

    /// Sets the prospect's location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the prospect's job title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the service the persona sells.
    #[must_use]
    pub fn with_service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = service_type.into();
        self
    }

    /// Sets the booking link offered to qualified prospects.
    #[must_use]
    pub fn with_calendar_link(mut self, link: impl Into<String>) -> Self {
        self.calendar_link = Some(link.into());
        self
    }

    /// Returns the company this persona sells for.
    #[must_use]
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    /// The assistant's display name in the remote account.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {} Demo Assistant", self.company_name, self.service_type)
    }

    /// The scripted first message the prospect is replying to.
    ///
    /// The demo page shows this line before any run happens, so the
    /// instructions tell the assistant to treat it as already sent.
    #[must_use]
    pub fn opening_line(&self) -> String {
        format!(
            "It's {} from {} here. Is this the same {} that got a {} quote \
             from us in the last couple of months?",
            self.rep_name, self.company_name, self.contact_name, self.service_type
        )
    }

    /// Assembles the full instruction block for assistant creation.
    #[must_use]
    pub fn instructions(&self) -> String {
        let mut blocks = Vec::new();

        blocks.push(format!(
            "Your job is to qualify leads over SMS for {service}. Ask one \
             question at a time to work through the qualification steps. If \
             the prospect drifts, steer back without conciliatory phrases.",
            service = self.service_type
        ));

        let mut prospect = format!(
            "PROSPECT INFORMATION:\n- Name: {}\n- Company: {}",
            self.contact_name, self.company_name
        );
        if let Some(title) = &self.title {
            prospect.push_str(&format!("\n- Title: {title}"));
        }
        if let Some(location) = &self.location {
            prospect.push_str(&format!("\n- Location: {location}"));
        }
        blocks.push(prospect);

        blocks.push("Output style: casual SMS, conversational, brief.".to_string());

        blocks.push(format!(
            "FIRST MESSAGE (already shown to the prospect, do not repeat it): \
             \"{}\"",
            self.opening_line()
        ));

        let mut steps = String::from(
            "Qualification steps:\n\
             - If their reply to the first message is positive, confirm they \
             still want help; if negative, confirm whether they are \
             interested at all.\n\
             - Get a rough average of their monthly utility bill.\n\
             - Tell them we can beat any market price and offer a callback.",
        );
        if let Some(link) = &self.calendar_link {
            steps.push_str(&format!(
                "\n- If they want a callback, send: \"Great! Here's my \
                 calendar for you to book in a time - {link}\""
            ));
        }
        blocks.push(steps);

        blocks.push(format!(
            "Rules:\n\
             - One question per message.\n\
             - You are not an AI; you are {rep}, working in admin at \
             {company}.\n\
             - For pricing or deals, push for a call with an adviser.\n\
             - Vary your responses to similar questions.\n\
             - If asked where we got their details, tell them they enquired \
             via our website and can reply 'delete' to opt out.",
            rep = self.rep_name,
            company = self.company_name
        ));

        blocks.join("\n\n###\n\n")
    }
}
