/// The parts of a pull request the workload accounting looks at.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PullRequestSummary {
    pub number: u64,
    pub assignee: Option<String>,
}

impl PullRequestSummary {
    pub fn new(number: u64, assignee: Option<impl ToString>) -> Self {
        Self {
            number,
            assignee: assignee.map(|a| a.to_string()),
        }
    }

    /// Assignee login, treating an empty login as no assignee.
    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref().filter(|login| !login.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Pending,
    Dismissed,
    Unknown,
}

impl ReviewState {
    /// Maps the state strings the hosting APIs return.
    pub fn parse(state: &str) -> Self {
        match state.to_ascii_uppercase().as_str() {
            "APPROVED" => Self::Approved,
            "CHANGES_REQUESTED" | "REQUEST_CHANGES" => Self::ChangesRequested,
            "COMMENTED" | "COMMENT" => Self::Commented,
            "PENDING" => Self::Pending,
            "DISMISSED" => Self::Dismissed,
            _ => Self::Unknown,
        }
    }

    /// Everything except a comment-only review counts as reviewing.
    pub fn counts_as_review(&self) -> bool {
        !matches!(self, Self::Commented)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReviewEvent {
    pub reviewer_login: String,
    pub state: ReviewState,
}

impl ReviewEvent {
    pub fn new(reviewer_login: impl ToString, state: ReviewState) -> Self {
        Self {
            reviewer_login: reviewer_login.to_string(),
            state,
        }
    }
}
