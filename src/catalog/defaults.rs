use super::{ComponentDefinition, ProcessorDefinition, StepsProperty, StepsPropertyType};
use ahash::AHashMap;

/// Defines the built-in processors and their steps properties, in the order
/// their children are laid out.
macro_rules! define_processors {
    ( $( ($name:expr, $title:expr $(, $prop:expr => $kind:ident )* ) ),* $(,)? ) => {
        pub(super) fn register_default_processors(processors: &mut AHashMap<String, ProcessorDefinition>) {
            $(
                processors.insert($name.to_string(), ProcessorDefinition {
                    name: $name.to_string(),
                    title: $title.to_string(),
                    icon: Some(format!("{}.svg", $name)),
                    description: None,
                    steps_properties: vec![ $( StepsProperty::new($prop, StepsPropertyType::$kind) ),* ],
                });
            )*
        }
    };
}

macro_rules! define_components {
    ( $( ($name:expr, $title:expr) ),* $(,)? ) => {
        pub(super) fn register_default_components(components: &mut AHashMap<String, ComponentDefinition>) {
            $(
                components.insert($name.to_string(), ComponentDefinition {
                    name: $name.to_string(),
                    title: $title.to_string(),
                    icon: Some(format!("{}.svg", $name)),
                    description: None,
                });
            )*
        }
    };
}

define_processors! {
    // Entry point
    ("from", "From", "steps" => Branch),

    // Branching
    ("choice", "Choice", "when" => Array, "otherwise" => SingleClause),
    ("when", "When", "steps" => Branch),
    ("otherwise", "Otherwise", "steps" => Branch),
    ("doTry", "Do Try", "steps" => Branch, "doCatch" => Array, "doFinally" => SingleClause),
    ("doCatch", "Do Catch", "steps" => Branch),
    ("doFinally", "Do Finally", "steps" => Branch),
    ("circuitBreaker", "Circuit Breaker", "steps" => Branch, "onFallback" => SingleClause),
    ("onFallback", "On Fallback", "steps" => Branch),

    // Step containers
    ("aggregate", "Aggregate", "steps" => Branch),
    ("filter", "Filter", "steps" => Branch),
    ("split", "Split", "steps" => Branch),
    ("loop", "Loop", "steps" => Branch),
    ("multicast", "Multicast", "steps" => Branch),
    ("loadBalance", "Load Balance", "steps" => Branch),
    ("pipeline", "Pipeline", "steps" => Branch),
    ("resequence", "Resequence", "steps" => Branch),
    ("saga", "Saga", "steps" => Branch),
    ("step", "Step", "steps" => Branch),
    ("transacted", "Transacted", "steps" => Branch),
    ("idempotentConsumer", "Idempotent Consumer", "steps" => Branch),
    ("policy", "Policy", "steps" => Branch),
    ("threads", "Threads", "steps" => Branch),

    // Flow-scoped constructs
    ("intercept", "Intercept", "steps" => Branch),
    ("interceptFrom", "Intercept From", "steps" => Branch),
    ("interceptSendToEndpoint", "Intercept Send To Endpoint", "steps" => Branch),
    ("onException", "On Exception", "steps" => Branch),
    ("onCompletion", "On Completion", "steps" => Branch),
    (
        "routeConfiguration",
        "Route Configuration",
        "intercept" => Array,
        "interceptFrom" => Array,
        "interceptSendToEndpoint" => Array,
        "onException" => Array,
        "onCompletion" => Array
    ),

    // Leaves
    ("to", "To"),
    ("toD", "To D"),
    ("log", "Log"),
    ("setBody", "Set Body"),
    ("setHeader", "Set Header"),
    ("setHeaders", "Set Headers"),
    ("setProperty", "Set Property"),
    ("setVariable", "Set Variable"),
    ("removeHeader", "Remove Header"),
    ("removeHeaders", "Remove Headers"),
    ("removeProperty", "Remove Property"),
    ("removeProperties", "Remove Properties"),
    ("marshal", "Marshal"),
    ("unmarshal", "Unmarshal"),
    ("convertBodyTo", "Convert Body To"),
    ("transform", "Transform"),
    ("bean", "Bean"),
    ("process", "Process"),
    ("delay", "Delay"),
    ("throttle", "Throttle"),
    ("stop", "Stop"),
    ("rollback", "Rollback"),
    ("throwException", "Throw Exception"),
    ("script", "Script"),
    ("enrich", "Enrich"),
    ("pollEnrich", "Poll Enrich"),
    ("wireTap", "Wire Tap"),
    ("kamelet", "Kamelet"),
    ("validate", "Validate"),
    ("sort", "Sort"),
    ("sample", "Sample"),
    ("recipientList", "Recipient List"),
    ("routingSlip", "Routing Slip"),
    ("dynamicRouter", "Dynamic Router"),
    ("claimCheck", "Claim Check"),
    ("setExchangePattern", "Set Exchange Pattern"),
}

define_components! {
    ("timer", "Timer"),
    ("cron", "Cron"),
    ("direct", "Direct"),
    ("seda", "SEDA"),
    ("log", "Log"),
    ("http", "HTTP"),
    ("https", "HTTPS"),
    ("rest", "REST"),
    ("platform-http", "Platform HTTP"),
    ("kafka", "Kafka"),
    ("jms", "JMS"),
    ("file", "File"),
    ("sql", "SQL"),
    ("kamelet", "Kamelets"),
}
