//! Statement lowering.

use crate::{
    ast::nodes::{CondJoin, IfNode, Node},
    errors::errors::Error,
};

use super::{
    compiler::{Compiler, FnLowering},
    expr::{gen_condition, gen_expression, implicit_coerce},
};

pub fn gen_statement<'a>(
    compiler: &mut Compiler<'a>,
    lowering: &mut FnLowering<'a>,
    statement: &Node,
) -> Result<(), Error> {
    match statement {
        Node::Expression(expr) => {
            gen_expression(compiler, lowering, expr)?;
            Ok(())
        }
        Node::VariableDecl { name, ty, value } => {
            let slot = compiler
                .builder
                .build_alloca(compiler.convert_type(*ty), name)
                .unwrap();

            if let Some(value) = value {
                let (initial, initial_ty) = gen_expression(compiler, lowering, value)?;
                let initial = implicit_coerce(compiler, initial, initial_ty, *ty)?;
                compiler.builder.build_store(slot, initial).unwrap();
            }

            lowering.variables.insert(name.clone(), (slot, *ty));
            Ok(())
        }
        Node::Return { value } => {
            if let Some(value) = value {
                let (result, result_ty) = gen_expression(compiler, lowering, value)?;
                let result = implicit_coerce(compiler, result, result_ty, lowering.return_type)?;
                if let Some(slot) = lowering.return_slot {
                    compiler.builder.build_store(slot, result).unwrap();
                }
            }

            // The single-exit convention: every return statement branches to
            // the shared exit block instead of emitting its own ret.
            compiler
                .builder
                .build_unconditional_branch(lowering.exit_block)
                .unwrap();

            // Anything after a return in the same statement sequence lowers
            // into a fresh, unreachable block.
            let dead = compiler
                .context
                .append_basic_block(lowering.function, "postret");
            compiler.builder.position_at_end(dead);
            Ok(())
        }
        Node::If(if_node) => gen_if(compiler, lowering, if_node),
        Node::Import { path } => {
            compiler.imports.push(path.clone());
            Ok(())
        }
        Node::Function(function) => {
            // A nested declaration lowers like a top-level one; the builder
            // position is restored so the enclosing body continues.
            let previous = compiler.builder.get_insert_block();
            compiler.gen_function(&function.proto, &function.body)?;
            if let Some(previous) = previous {
                compiler.builder.position_at_end(previous);
            }
            Ok(())
        }
    }
}

/// Lowers an if-construct with short-circuit condition evaluation.
///
/// Conditions combine as a strict left-to-right fold: the running result of
/// everything to the left joins with the next condition, whatever mix of
/// joins the chain uses. Short-circuiting follows from the fold. A true
/// running result skips ahead through OR joins to the next AND conjunct, or
/// to the then-block when none remains; a false running result skips ahead
/// through AND joins to the next OR alternative, or to the after-block when
/// none remains. Each condition after the first evaluates in its own basic
/// block so skipped branches emit no code on the taken path.
fn gen_if<'a>(
    compiler: &mut Compiler<'a>,
    lowering: &mut FnLowering<'a>,
    if_node: &IfNode,
) -> Result<(), Error> {
    let then_block = compiler
        .context
        .append_basic_block(lowering.function, "then");
    let after_block = compiler
        .context
        .append_basic_block(lowering.function, "after");

    // conditions[i] for i > 0 evaluates in cond_blocks[i - 1], named after
    // the join that introduces it.
    let cond_blocks: Vec<_> = if_node
        .separators
        .iter()
        .map(|join| {
            let name = match join {
                CondJoin::And => "and_next",
                CondJoin::Or => "or_next",
            };
            compiler.context.append_basic_block(lowering.function, name)
        })
        .collect();

    for (i, condition) in if_node.conditions.iter().enumerate() {
        let flag = gen_condition(compiler, lowering, condition)?;

        // A true result falls through OR joins; the first AND join names
        // the condition that must still hold.
        let true_target = if_node.separators[i..]
            .iter()
            .position(|join| *join == CondJoin::And)
            .map(|offset| cond_blocks[i + offset])
            .unwrap_or(then_block);

        // A false result falls through AND joins; the first OR join names
        // the alternative that can still rescue the chain.
        let false_target = if_node.separators[i..]
            .iter()
            .position(|join| *join == CondJoin::Or)
            .map(|offset| cond_blocks[i + offset])
            .unwrap_or(after_block);

        compiler
            .builder
            .build_conditional_branch(flag, true_target, false_target)
            .unwrap();

        if i < cond_blocks.len() {
            compiler.builder.position_at_end(cond_blocks[i]);
        }
    }

    compiler.builder.position_at_end(then_block);
    for statement in if_node.then_body.iter() {
        gen_statement(compiler, lowering, statement)?;
    }

    let current = compiler.builder.get_insert_block().unwrap();
    if current.get_terminator().is_none() {
        compiler
            .builder
            .build_unconditional_branch(after_block)
            .unwrap();
    }

    compiler.builder.position_at_end(after_block);
    Ok(())
}
