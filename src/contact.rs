// Contact form with a simulated submission. Nothing is sent anywhere: submit
// waits out a fixed delay, reports success, clears the fields and returns to
// idle after another delay. Time is passed in (milliseconds) so the whole
// thing can be driven from requestAnimationFrame timestamps or from a test.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub fn parse(name: &str) -> Option<ContactField> {
        match name {
            "name" => Some(ContactField::Name),
            "email" => Some(ContactField::Email),
            "subject" => Some(ContactField::Subject),
            "message" => Some(ContactField::Message),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFields {
    fn get_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ContactPhase {
    Idle,
    Submitting { since: f64 },
    Succeeded { since: f64 },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContactTimings {
    pub submit_delay_ms: f64,
    pub success_display_ms: f64,
}

impl Default for ContactTimings {
    fn default() -> Self {
        ContactTimings {
            submit_delay_ms: 1500.0,
            success_display_ms: 5000.0,
        }
    }
}

#[derive(Debug)]
pub struct ContactForm {
    fields: ContactFields,
    phase: ContactPhase,
    timings: ContactTimings,
}

impl ContactForm {
    pub fn new(timings: ContactTimings) -> Self {
        ContactForm {
            fields: ContactFields::default(),
            phase: ContactPhase::Idle,
            timings,
        }
    }

    pub fn set(&mut self, field: ContactField, value: &str) {
        *self.fields.get_mut(field) = value.to_owned();
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn phase(&self) -> ContactPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, ContactPhase::Submitting { .. })
    }

    // Starts a submission. Only ignored while one is already in flight;
    // submitting again while the success notice shows is allowed.
    pub fn submit(&mut self, now: f64) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.phase = ContactPhase::Submitting { since: now };
        true
    }

    // Moves the form along once the relevant delay has passed.
    pub fn poll(&mut self, now: f64) -> ContactPhase {
        match self.phase {
            ContactPhase::Submitting { since } if now - since >= self.timings.submit_delay_ms => {
                self.fields = ContactFields::default();
                self.phase = ContactPhase::Succeeded { since: now };
            }
            ContactPhase::Succeeded { since } if now - since >= self.timings.success_display_ms => {
                self.phase = ContactPhase::Idle;
            }
            _ => {}
        }
        self.phase
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        ContactForm::new(ContactTimings::default())
    }
}
