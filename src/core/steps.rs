/// Total number of wizard steps, results screen included.
pub const TOTAL_STEPS: u8 = 8;

/// One wizard screen. The order is fixed; branching only changes which
/// screens are visited, never their relative order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Operation,
    PropertyType,
    Bedrooms,
    Bathrooms,
    Surface,
    Features,
    Budget,
    Results,
}

/// Forward and backward edges for one step, indexed by whether the
/// selected type is the commercial-unit variant.
struct StepTransitions {
    forward: [Option<Step>; 2],
    back: [Option<Step>; 2],
}

/// The whole flow as data. Row order follows step numbers; column 0 is
/// the residential path, column 1 the commercial one. The commercial
/// path skips the bedroom and bathroom screens in both directions.
/// Results has no outgoing edges: the flow ends there and the computed
/// match set is never invalidated by navigation.
const TRANSITIONS: [StepTransitions; TOTAL_STEPS as usize] = [
    // Operation
    StepTransitions {
        forward: [Some(Step::PropertyType), Some(Step::PropertyType)],
        back: [None, None],
    },
    // PropertyType
    StepTransitions {
        forward: [Some(Step::Bedrooms), Some(Step::Surface)],
        back: [Some(Step::Operation), Some(Step::Operation)],
    },
    // Bedrooms
    StepTransitions {
        forward: [Some(Step::Bathrooms), Some(Step::Bathrooms)],
        back: [Some(Step::PropertyType), Some(Step::PropertyType)],
    },
    // Bathrooms
    StepTransitions {
        forward: [Some(Step::Surface), Some(Step::Surface)],
        back: [Some(Step::Bedrooms), Some(Step::Bedrooms)],
    },
    // Surface
    StepTransitions {
        forward: [Some(Step::Features), Some(Step::Features)],
        back: [Some(Step::Bathrooms), Some(Step::PropertyType)],
    },
    // Features
    StepTransitions {
        forward: [Some(Step::Budget), Some(Step::Budget)],
        back: [Some(Step::Surface), Some(Step::Surface)],
    },
    // Budget
    StepTransitions {
        forward: [Some(Step::Results), Some(Step::Results)],
        back: [Some(Step::Features), Some(Step::Features)],
    },
    // Results
    StepTransitions {
        forward: [None, None],
        back: [None, None],
    },
];

impl Step {
    /// 1-based step number shown to the client.
    #[inline]
    pub fn number(&self) -> u8 {
        match self {
            Step::Operation => 1,
            Step::PropertyType => 2,
            Step::Bedrooms => 3,
            Step::Bathrooms => 4,
            Step::Surface => 5,
            Step::Features => 6,
            Step::Budget => 7,
            Step::Results => 8,
        }
    }

    /// Short label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Step::Operation => "operation",
            Step::PropertyType => "property type",
            Step::Bedrooms => "bedrooms",
            Step::Bathrooms => "bathrooms",
            Step::Surface => "surface",
            Step::Features => "features",
            Step::Budget => "budget",
            Step::Results => "results",
        }
    }

    /// Next step, branching on the commercial flag at transition time.
    #[inline]
    pub fn next(&self, commercial: bool) -> Option<Step> {
        TRANSITIONS[self.number() as usize - 1].forward[commercial as usize]
    }

    /// Previous step, branching on the commercial flag at transition time.
    #[inline]
    pub fn prev(&self, commercial: bool) -> Option<Step> {
        TRANSITIONS[self.number() as usize - 1].back[commercial as usize]
    }
}
