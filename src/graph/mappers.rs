use super::NodeIndex;
use super::context::BuildContext;
use super::mapper::NodeMapper;
use crate::catalog::{StepsProperty, StepsPropertyType};
use crate::path::Path;

/// `when` clauses in order, then `otherwise`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChoiceMapper;

impl NodeMapper for ChoiceMapper {
    fn processor_name(&self) -> &str {
        "choice"
    }

    fn build(&self, ctx: &mut BuildContext<'_>, path: &Path, processor_name: &str) -> NodeIndex {
        let node = ctx.create_node(path, processor_name);
        let whens = ctx.children_of_property(path, &StepsProperty::new("when", StepsPropertyType::Array));
        let otherwise = ctx.children_of_property(
            path,
            &StepsProperty::new("otherwise", StepsPropertyType::SingleClause),
        );
        ctx.add_children(node, whens);
        ctx.add_children(node, otherwise);
        node
    }
}

/// The route entry. Its steps are lifted into the enclosing group and
/// chained after it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FromMapper;

impl NodeMapper for FromMapper {
    fn processor_name(&self) -> &str {
        "from"
    }

    fn build(&self, ctx: &mut BuildContext<'_>, path: &Path, processor_name: &str) -> NodeIndex {
        let node = ctx.create_node(path, processor_name);
        let steps = ctx.children_of_property(path, &StepsProperty::new("steps", StepsPropertyType::Branch));
        ctx.add_children(node, steps);
        ctx.mark_flatten(node);
        node
    }
}

/// Try steps chained, then every `doCatch`, then `doFinally`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DoTryMapper;

impl NodeMapper for DoTryMapper {
    fn processor_name(&self) -> &str {
        "doTry"
    }

    fn build(&self, ctx: &mut BuildContext<'_>, path: &Path, processor_name: &str) -> NodeIndex {
        let node = ctx.create_node(path, processor_name);
        let steps = ctx.children_of_property(path, &StepsProperty::new("steps", StepsPropertyType::Branch));
        let catches = ctx.children_of_property(path, &StepsProperty::new("doCatch", StepsPropertyType::Array));
        let finally = ctx.children_of_property(
            path,
            &StepsProperty::new("doFinally", StepsPropertyType::SingleClause),
        );
        ctx.add_children(node, steps);
        ctx.add_children(node, catches);
        ctx.add_children(node, finally);
        node
    }
}

/// Processors whose steps run side by side. The steps become children but
/// are not linked to each other.
#[derive(Debug, Clone)]
pub struct ParallelMapper {
    name: String,
}

impl ParallelMapper {
    pub const PROCESSORS: [&'static str; 3] = ["multicast", "loadBalance", "recipientList"];

    pub fn new(processor_name: &str) -> Self {
        Self {
            name: processor_name.to_string(),
        }
    }
}

impl NodeMapper for ParallelMapper {
    fn processor_name(&self) -> &str {
        &self.name
    }

    fn build(&self, ctx: &mut BuildContext<'_>, path: &Path, processor_name: &str) -> NodeIndex {
        let node = ctx.create_node(path, processor_name);
        let steps = ctx.branch_children(&path.child("steps"));
        ctx.add_children(node, steps);
        node
    }
}
