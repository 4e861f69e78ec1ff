//! Expression lowering.
//!
//! Every expression lowers to a single `(value, type)` pair. Implicit
//! conversions only ever widen along the fixed numeric order; explicit
//! casts convert in any direction except to or from `void`.

use inkwell::{
    values::{BasicMetadataValueEnum, BasicValueEnum, IntValue},
    FloatPredicate, IntPredicate,
};

use crate::{
    ast::{
        nodes::{ConditionExpr, Expr},
        types::ValueType,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::compiler::{codegen_position, Compiler, FnLowering};

pub fn gen_expression<'a>(
    compiler: &mut Compiler<'a>,
    lowering: &mut FnLowering<'a>,
    expression: &Expr,
) -> Result<(BasicValueEnum<'a>, ValueType), Error> {
    match expression {
        Expr::Number { value, ty } => {
            let constant: BasicValueEnum<'a> = if ty.is_integer() {
                compiler
                    .convert_type(*ty)
                    .into_int_type()
                    .const_int(*value as u64, false)
                    .into()
            } else {
                compiler
                    .convert_type(*ty)
                    .into_float_type()
                    .const_float(*value)
                    .into()
            };
            Ok((constant, *ty))
        }
        Expr::Variable(name) => {
            let (slot, ty) = *lowering.variables.get(name).ok_or_else(|| {
                Error::new(
                    ErrorImpl::UnresolvedVariable { name: name.clone() },
                    codegen_position(),
                )
            })?;

            let value = compiler.builder.build_load(slot, name).unwrap();
            Ok((value, ty))
        }
        // String literals lower to pointers into a global; they sit outside
        // the numeric type order, so no implicit conversion applies to them.
        Expr::Str(value) => {
            let global = compiler
                .builder
                .build_global_string_ptr(value, "str")
                .unwrap();
            Ok((global.as_pointer_value().into(), ValueType::Str))
        }
        Expr::Binary { op, left, right } => gen_binary(compiler, lowering, *op, left, right),
        Expr::Call { callee, args } => gen_call(compiler, lowering, callee, args),
        Expr::Cast { value, target } => {
            let (raw, from) = gen_expression(compiler, lowering, value)?;
            let converted = explicit_cast(compiler, raw, from, *target)?;
            Ok((converted, *target))
        }
        Expr::Assignment { name, value } => {
            let (result, result_ty) = gen_expression(compiler, lowering, value)?;

            let (slot, declared_ty) = *lowering.variables.get(name).ok_or_else(|| {
                Error::new(
                    ErrorImpl::UnresolvedVariable { name: name.clone() },
                    codegen_position(),
                )
            })?;

            let result = implicit_coerce(compiler, result, result_ty, declared_ty)?;
            compiler.builder.build_store(slot, result).unwrap();

            Ok((result, declared_ty))
        }
    }
}

/// Lowers a binary arithmetic operation. Operands of unequal type are
/// unified by widening the narrower side before the instruction is emitted.
fn gen_binary<'a>(
    compiler: &mut Compiler<'a>,
    lowering: &mut FnLowering<'a>,
    op: TokenKind,
    left: &Expr,
    right: &Expr,
) -> Result<(BasicValueEnum<'a>, ValueType), Error> {
    let (left_value, left_ty) = gen_expression(compiler, lowering, left)?;
    let (right_value, right_ty) = gen_expression(compiler, lowering, right)?;

    let common = ValueType::wider_of(left_ty, right_ty).ok_or_else(|| {
        Error::new(
            ErrorImpl::InvalidOperands {
                op: op.to_string(),
                left: left_ty.to_string(),
                right: right_ty.to_string(),
            },
            codegen_position(),
        )
    })?;

    let left_value = implicit_coerce(compiler, left_value, left_ty, common)?;
    let right_value = implicit_coerce(compiler, right_value, right_ty, common)?;

    let result: BasicValueEnum<'a> = if common.is_integer() {
        let lhs = left_value.into_int_value();
        let rhs = right_value.into_int_value();
        match op {
            TokenKind::Plus => compiler.builder.build_int_add(lhs, rhs, "add").unwrap().into(),
            TokenKind::Dash => compiler.builder.build_int_sub(lhs, rhs, "sub").unwrap().into(),
            TokenKind::Star => compiler.builder.build_int_mul(lhs, rhs, "mul").unwrap().into(),
            TokenKind::Slash => compiler
                .builder
                .build_int_signed_div(lhs, rhs, "div")
                .unwrap()
                .into(),
            TokenKind::Percent => compiler
                .builder
                .build_int_signed_rem(lhs, rhs, "rem")
                .unwrap()
                .into(),
            _ => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: op.to_string(),
                    },
                    codegen_position(),
                ))
            }
        }
    } else {
        let lhs = left_value.into_float_value();
        let rhs = right_value.into_float_value();
        match op {
            TokenKind::Plus => compiler
                .builder
                .build_float_add(lhs, rhs, "fadd")
                .unwrap()
                .into(),
            TokenKind::Dash => compiler
                .builder
                .build_float_sub(lhs, rhs, "fsub")
                .unwrap()
                .into(),
            TokenKind::Star => compiler
                .builder
                .build_float_mul(lhs, rhs, "fmul")
                .unwrap()
                .into(),
            TokenKind::Slash => compiler
                .builder
                .build_float_div(lhs, rhs, "fdiv")
                .unwrap()
                .into(),
            TokenKind::Percent => compiler
                .builder
                .build_float_rem(lhs, rhs, "frem")
                .unwrap()
                .into(),
            _ => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: op.to_string(),
                    },
                    codegen_position(),
                ))
            }
        }
    };

    Ok((result, common))
}

/// Lowers a call. The argument count is checked before any argument
/// instruction is emitted; each argument is then implicitly coerced to its
/// matching parameter type.
fn gen_call<'a>(
    compiler: &mut Compiler<'a>,
    lowering: &mut FnLowering<'a>,
    callee: &str,
    args: &[Expr],
) -> Result<(BasicValueEnum<'a>, ValueType), Error> {
    let proto = compiler
        .prototypes
        .get(callee)
        .cloned()
        .ok_or_else(|| {
            Error::new(
                ErrorImpl::UnresolvedFunction {
                    name: callee.to_string(),
                },
                codegen_position(),
            )
        })?;

    if args.len() != proto.arg_types.len() {
        return Err(Error::new(
            ErrorImpl::ArityMismatch {
                function: callee.to_string(),
                expected: proto.arg_types.len(),
                received: args.len(),
            },
            codegen_position(),
        ));
    }

    let mut lowered_args: Vec<BasicMetadataValueEnum<'a>> = vec![];
    for (arg, param_ty) in args.iter().zip(proto.arg_types.iter()) {
        let (value, ty) = gen_expression(compiler, lowering, arg)?;
        let value = implicit_coerce(compiler, value, ty, *param_ty)?;
        lowered_args.push(value.into());
    }

    let function = compiler.module.get_function(callee).unwrap_or_else(|| {
        panic!("function {} registered but not declared", callee);
    });

    let call = compiler
        .builder
        .build_call(function, lowered_args.as_slice(), "call")
        .unwrap();

    let result = call
        .try_as_basic_value()
        .left()
        .unwrap_or_else(|| compiler.context.i32_type().const_zero().into());

    Ok((result, proto.return_type))
}

/// Lowers one `lhs relop rhs` condition of an if-construct to an `i1`.
pub fn gen_condition<'a>(
    compiler: &mut Compiler<'a>,
    lowering: &mut FnLowering<'a>,
    condition: &ConditionExpr,
) -> Result<IntValue<'a>, Error> {
    let (left_value, left_ty) = gen_expression(compiler, lowering, &condition.left)?;
    let (right_value, right_ty) = gen_expression(compiler, lowering, &condition.right)?;

    // Bool operands compare directly under (in)equality; everything else
    // unifies along the widening order first.
    if left_ty == ValueType::Bool && right_ty == ValueType::Bool {
        let predicate = match condition.op {
            TokenKind::Equals => IntPredicate::EQ,
            TokenKind::NotEquals => IntPredicate::NE,
            _ => {
                return Err(Error::new(
                    ErrorImpl::InvalidOperands {
                        op: condition.op.to_string(),
                        left: left_ty.to_string(),
                        right: right_ty.to_string(),
                    },
                    codegen_position(),
                ))
            }
        };
        return Ok(compiler
            .builder
            .build_int_compare(
                predicate,
                left_value.into_int_value(),
                right_value.into_int_value(),
                "cmp",
            )
            .unwrap());
    }

    let common = ValueType::wider_of(left_ty, right_ty).ok_or_else(|| {
        Error::new(
            ErrorImpl::InvalidOperands {
                op: condition.op.to_string(),
                left: left_ty.to_string(),
                right: right_ty.to_string(),
            },
            codegen_position(),
        )
    })?;

    let left_value = implicit_coerce(compiler, left_value, left_ty, common)?;
    let right_value = implicit_coerce(compiler, right_value, right_ty, common)?;

    let flag = if common.is_integer() {
        let predicate = match condition.op {
            TokenKind::Equals => IntPredicate::EQ,
            TokenKind::NotEquals => IntPredicate::NE,
            TokenKind::Less => IntPredicate::SLT,
            TokenKind::LessEquals => IntPredicate::SLE,
            TokenKind::Greater => IntPredicate::SGT,
            TokenKind::GreaterEquals => IntPredicate::SGE,
            _ => unreachable!("parser only accepts relational operators here"),
        };
        compiler
            .builder
            .build_int_compare(
                predicate,
                left_value.into_int_value(),
                right_value.into_int_value(),
                "cmp",
            )
            .unwrap()
    } else {
        let predicate = match condition.op {
            TokenKind::Equals => FloatPredicate::OEQ,
            TokenKind::NotEquals => FloatPredicate::ONE,
            TokenKind::Less => FloatPredicate::OLT,
            TokenKind::LessEquals => FloatPredicate::OLE,
            TokenKind::Greater => FloatPredicate::OGT,
            TokenKind::GreaterEquals => FloatPredicate::OGE,
            _ => unreachable!("parser only accepts relational operators here"),
        };
        compiler
            .builder
            .build_float_compare(
                predicate,
                left_value.into_float_value(),
                right_value.into_float_value(),
                "fcmp",
            )
            .unwrap()
    };

    Ok(flag)
}

/// Implicitly converts `value` from `from` to `to`.
///
/// Only widening along the numeric order is implicit; identical types pass
/// through untouched so no redundant conversion is ever emitted. Anything
/// else is a TypeError.
pub fn implicit_coerce<'a>(
    compiler: &Compiler<'a>,
    value: BasicValueEnum<'a>,
    from: ValueType,
    to: ValueType,
) -> Result<BasicValueEnum<'a>, Error> {
    if from == to {
        return Ok(value);
    }

    let widens = match (from.widening_rank(), to.widening_rank()) {
        (Some(from_rank), Some(to_rank)) => from_rank < to_rank,
        _ => false,
    };
    if !widens {
        return Err(Error::new(
            ErrorImpl::TypeMismatch {
                expected: to.to_string(),
                received: from.to_string(),
            },
            codegen_position(),
        ));
    }

    Ok(convert_numeric(compiler, value, from, to))
}

/// Explicitly converts `value` from `from` to `to`, narrowing included.
/// Casts to or from `void` fail here rather than silently.
pub fn explicit_cast<'a>(
    compiler: &Compiler<'a>,
    value: BasicValueEnum<'a>,
    from: ValueType,
    to: ValueType,
) -> Result<BasicValueEnum<'a>, Error> {
    if from == to {
        return Ok(value);
    }

    if from == ValueType::Void || to == ValueType::Void {
        let other = if from == ValueType::Void { to } else { from };
        return Err(Error::new(
            ErrorImpl::VoidCast {
                ty: other.to_string(),
            },
            codegen_position(),
        ));
    }

    // String pointers convert to nothing.
    if from == ValueType::Str {
        return Err(Error::new(
            ErrorImpl::TypeMismatch {
                expected: to.to_string(),
                received: from.to_string(),
            },
            codegen_position(),
        ));
    }

    // Bool maps zero/nonzero in both directions.
    if from == ValueType::Bool {
        let flag = value.into_int_value();
        let converted: BasicValueEnum<'a> = if to.is_integer() {
            compiler
                .builder
                .build_int_z_extend(flag, compiler.convert_type(to).into_int_type(), "cast")
                .unwrap()
                .into()
        } else {
            compiler
                .builder
                .build_unsigned_int_to_float(
                    flag,
                    compiler.convert_type(to).into_float_type(),
                    "cast",
                )
                .unwrap()
                .into()
        };
        return Ok(converted);
    }
    if to == ValueType::Bool {
        let flag: IntValue<'a> = if from.is_integer() {
            let zero = compiler.convert_type(from).into_int_type().const_zero();
            compiler
                .builder
                .build_int_compare(IntPredicate::NE, value.into_int_value(), zero, "cast")
                .unwrap()
        } else {
            let zero = compiler.convert_type(from).into_float_type().const_zero();
            compiler
                .builder
                .build_float_compare(FloatPredicate::ONE, value.into_float_value(), zero, "cast")
                .unwrap()
        };
        return Ok(flag.into());
    }

    Ok(convert_numeric(compiler, value, from, to))
}

/// Emits the conversion instruction between two ranked numeric types.
fn convert_numeric<'a>(
    compiler: &Compiler<'a>,
    value: BasicValueEnum<'a>,
    from: ValueType,
    to: ValueType,
) -> BasicValueEnum<'a> {
    match (from.is_integer(), to.is_integer()) {
        (true, true) => {
            let target = compiler.convert_type(to).into_int_type();
            if from.widening_rank() < to.widening_rank() {
                compiler
                    .builder
                    .build_int_s_extend(value.into_int_value(), target, "widen")
                    .unwrap()
                    .into()
            } else {
                compiler
                    .builder
                    .build_int_truncate(value.into_int_value(), target, "narrow")
                    .unwrap()
                    .into()
            }
        }
        (true, false) => compiler
            .builder
            .build_signed_int_to_float(
                value.into_int_value(),
                compiler.convert_type(to).into_float_type(),
                "widen",
            )
            .unwrap()
            .into(),
        (false, true) => compiler
            .builder
            .build_float_to_signed_int(
                value.into_float_value(),
                compiler.convert_type(to).into_int_type(),
                "narrow",
            )
            .unwrap()
            .into(),
        (false, false) => {
            let target = compiler.convert_type(to).into_float_type();
            if from.widening_rank() < to.widening_rank() {
                compiler
                    .builder
                    .build_float_ext(value.into_float_value(), target, "widen")
                    .unwrap()
                    .into()
            } else {
                compiler
                    .builder
                    .build_float_trunc(value.into_float_value(), target, "narrow")
                    .unwrap()
                    .into()
            }
        }
    }
}
