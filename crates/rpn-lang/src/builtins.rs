//! Structural words every interpreter starts with.

use std::rc::Rc;

use rpn_vm::ValueKind;

use crate::dictionary::{Validator, WordContext, WordDefinition};
use crate::error::{WordError, WordResult};
use crate::interp::Interp;
use crate::lexer;

fn comment(rest: &mut String) -> WordResult {
    lexer::take_until(rest, ')')
        .map(|_| ())
        .ok_or_else(|| WordError::Parse("unterminated comment".into()))
}

fn string_literal(rest: &mut String) -> Result<String, WordError> {
    lexer::take_until(rest, '"').ok_or_else(|| WordError::Parse("unterminated string".into()))
}

pub(crate) fn register(interp: &mut Interp) {
    use ValueKind::{Boolean, Double, Integer};

    let none = Rc::new(Validator::depth(0));
    let boolean = Rc::new(Validator::kinds(&[Boolean]));
    let owned = |def: WordDefinition| def.with_context(WordContext::Owner);

    // Run time.
    interp.register(":", owned(WordDefinition::new(&none, |i, _, _| i.begin_definition())));
    interp.register("(", owned(WordDefinition::new(&none, |_, _, rest| comment(rest))));
    interp.register(
        ".\"",
        owned(WordDefinition::new(&none, |i, _, rest| {
            let text = string_literal(rest)?;
            Ok(i.stack.push_string(text)?)
        })),
    );
    for bounds in [
        [Integer, Integer],
        [Integer, Double],
        [Double, Integer],
        [Double, Double],
    ] {
        let numbers = Rc::new(Validator::kinds(&bounds));
        interp.register("FOR", owned(WordDefinition::new(&numbers, |i, _, _| i.begin_loop())));
    }
    interp.register(
        "TRACE",
        owned(WordDefinition::new(&boolean, |i, _, _| {
            let on = i.stack.pop_boolean()?;
            i.set_tracing(on);
            Ok(())
        })),
    );
    interp.register(
        "<true>",
        WordDefinition::new(&none, |i, _, _| Ok(i.stack.push_boolean(true)?)),
    );
    interp.register(
        "<false>",
        WordDefinition::new(&none, |i, _, _| Ok(i.stack.push_boolean(false)?)),
    );
    interp.register(
        ";",
        owned(WordDefinition::new(&none, |_, _, _| {
            Err(WordError::compile("; outside a definition"))
        })),
    );
    interp.register(
        "NEXT",
        owned(WordDefinition::new(&none, |_, _, _| {
            Err(WordError::compile("NEXT outside a loop"))
        })),
    );

    // Compile time.
    interp.register_compile_time(";", owned(WordDefinition::new(&none, |i, _, _| i.end_definition())));
    interp.register_compile_time("(", owned(WordDefinition::new(&none, |_, _, rest| comment(rest))));
    interp.register_compile_time(
        ".\"",
        owned(WordDefinition::new(&none, |i, _, rest| {
            let text = string_literal(rest)?;
            i.append_literal(text);
            Ok(())
        })),
    );
    interp.register_compile_time("FOR", owned(WordDefinition::new(&none, |i, _, _| i.begin_loop())));
    interp.register_compile_time("NEXT", owned(WordDefinition::new(&none, |i, _, _| i.end_loop())));
}
