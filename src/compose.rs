//! Fixed email templates and their placeholder substitution.
//!
//! No templating engine: plain `replace` over template constants. The
//! composer is pure, so the same contact always renders the same text.

use crate::config::SenderProfile;

const SUBJECT_TEMPLATE: &str = "Exploring Opportunities at {company} — {sender_name}";

const BODY_TEMPLATE: &str = "\
Hi {name},

I hope this message finds you well.

My name is {sender_name}, and I'm a Full Stack Developer with roughly three years of experience specializing in TypeScript (React), .NET, SQL, and Python. I'm passionate about building clean, scalable systems and solving real engineering problems.

I came across {company} and I'd love to explore whether there are any open positions — or upcoming opportunities — where my skills could be a good fit.

I've attached my resume for your reference. I'd be grateful for the chance to connect or be considered for any suitable roles.

Thank you for your time, and I look forward to hearing from you.

Warm regards,
{sender_name}
{sender_email}
({sender_phone})
";

/// Subject used by the single-application driver.
pub const APPLY_SUBJECT: &str = "Apply | Software Development Engineer | Unravel.tech";

const APPLY_BODY_TEMPLATE: &str = "\
Hi,

I am writing to apply for the Software Development Engineer role at Unravel.tech.

I am a Full Stack Developer with roughly three years of experience, specializing in TypeScript (React), .NET, and SQL. I am comfortable in both Python and TypeScript and care about clean architecture and solving real engineering problems.

I have attached my resume below.

Thank you for considering my application, and I would be thrilled to hear from you.

Thanks,
{sender_name}
";

/// Renders subjects and bodies from the fixed templates.
#[derive(Debug, Clone)]
pub struct EmailComposer {
    profile: SenderProfile,
}

impl EmailComposer {
    pub fn new(profile: SenderProfile) -> Self {
        Self { profile }
    }

    /// Cold-outreach subject line for `company`.
    pub fn subject(&self, company: &str) -> String {
        SUBJECT_TEMPLATE
            .replace("{company}", company)
            .replace("{sender_name}", &self.profile.name)
    }

    /// Cold-outreach body addressed to `name` at `company`.
    pub fn body(&self, name: &str, company: &str) -> String {
        BODY_TEMPLATE
            .replace("{name}", name)
            .replace("{company}", company)
            .replace("{sender_name}", &self.profile.name)
            .replace("{sender_email}", &self.profile.email)
            .replace("{sender_phone}", &self.profile.phone)
    }

    /// Fixed application-letter body for the single-recipient driver.
    pub fn application_body(&self) -> String {
        APPLY_BODY_TEMPLATE.replace("{sender_name}", &self.profile.name)
    }
}
