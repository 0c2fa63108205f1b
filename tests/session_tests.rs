//! Integration tests for session history, registration tables and output.

use cwrap::{
    ArgumentSpec, DefaultKinds, DefaultValue, GenerationError, HookSet, Session, SessionError,
    TypeDef,
};
use pretty_assertions::assert_eq;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn unary_math() -> Vec<ArgumentSpec> {
    vec![ArgumentSpec::new("double"), ArgumentSpec::new("double").creturned()]
}

fn session_with_abs() -> Session {
    let mut session = Session::with_builtin_types();
    session.wrap("abs", [("fabs", unary_math())]).unwrap();
    session
}

// =============================================================================
// History
// =============================================================================

#[test]
fn retrieval_is_idempotent() {
    init_tracing();
    let mut session = session_with_abs();
    session.print("/* trailer */");

    let first = session.to_source();
    let second = session.to_source();
    assert_eq!(first, second);
    assert!(first.ends_with("}\n\n/* trailer */"));
}

#[test]
fn printed_text_keeps_its_place() {
    let mut session = Session::with_builtin_types();
    session.print("#include \"luaT.h\"");
    session.wrap("sqrt", [("sqrt", unary_math())]).unwrap();
    session.print("/* end */");

    let source = session.to_source();
    assert!(source.starts_with("#include \"luaT.h\"\nstatic int wrapper_sqrt(lua_State *L)\n{"));
    assert!(source.ends_with("return 1;\n}\n\n/* end */"));
    assert_eq!(session.history().fragments().len(), 3);
}

#[test]
fn clear_then_retrieve_is_empty() {
    init_tracing();
    let mut session = session_with_abs();
    session.add_default_argument(
        ArgumentSpec::new("int")
            .invisible()
            .with_default(DefaultValue::Int(0)),
    );
    session.clear_history();

    assert_eq!(session.to_source(), "");
    assert!(session.registrations().is_empty());
    // Types and default arguments survive a clear.
    assert!(session.registry().contains("double"));
    assert_eq!(session.default_arguments().len(), 1);
}

#[test]
fn sessions_are_independent() {
    let mut first = session_with_abs();
    let second = Session::with_builtin_types();
    first.register_type(TypeDef::new("Quaternion", HookSet::new()));

    assert!(!second.registry().contains("Quaternion"));
    assert_eq!(second.to_source(), "");
}

// =============================================================================
// Registration tables
// =============================================================================

#[test]
fn registration_table_lists_wrappers() {
    let mut session = session_with_abs();
    session.wrap("floor", [("floor", unary_math())]).unwrap();
    session.register_table("math_methods");

    let names: Vec<_> = session.registrations().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["abs", "floor"]);

    let table = session.history().fragments().last().cloned().unwrap();
    assert_eq!(
        table,
        "\
static const struct luaL_Reg math_methods[] = {
{\"abs\", wrapper_abs},
{\"floor\", wrapper_floor},
{NULL, NULL}
};
"
    );
}

#[test]
fn registration_names_are_escaped() {
    let mut session = Session::with_builtin_types();
    session.wrap("say\"hi\\", [("fabs", unary_math())]).unwrap();
    session.register_table("quoted");

    let table = session.history().fragments().last().cloned().unwrap();
    assert!(table.contains("{\"say\\\"hi\\\\\", "));
}

#[test]
fn empty_registration_table() {
    let mut session = Session::new();
    session.register_table("nothing");
    assert_eq!(
        session.to_source(),
        "static const struct luaL_Reg nothing[] = {\n{NULL, NULL}\n};\n"
    );
}

// =============================================================================
// Default arguments and custom types
// =============================================================================

#[test]
fn default_argument_prepended_to_every_variant() {
    let mut session = Session::with_builtin_types();
    session.add_default_argument(
        ArgumentSpec::new("long")
            .invisible()
            .with_default(DefaultValue::expr("default_generator(L)")),
    );
    session
        .wrap(
            "uniform",
            [
                (
                    "rng_uniform",
                    vec![
                        ArgumentSpec::new("long"),
                        ArgumentSpec::new("double").creturned(),
                    ],
                ),
                (
                    "rng_uniform_range",
                    vec![
                        ArgumentSpec::new("long"),
                        ArgumentSpec::new("double"),
                        ArgumentSpec::new("double"),
                        ArgumentSpec::new("double").creturned(),
                    ],
                ),
            ],
        )
        .unwrap();

    let source = session.to_source();
    assert_eq!(source.matches("= default_generator(L);").count(), 2);
    assert!(source.contains("arg3 = rng_uniform(arg1,arg2);"));
    assert!(source.contains("arg8 = rng_uniform_range(arg4,arg5,arg6,arg7);"));
    assert!(source.contains("expected arguments: long | double double"));
}

#[test]
fn argument_hooks_mask_type_hooks() {
    let mut session = Session::with_builtin_types();
    let by_address = ArgumentSpec::new("double")
        .returned()
        .with_hooks(HookSet::new().with_carg(|arg| format!("&{}", arg.var())));
    session.wrap("frexp", [("frexp_into", vec![by_address])]).unwrap();

    let source = session.to_source();
    assert!(source.contains("frexp_into(&arg1);"));
    assert!(source.contains("lua_pushnumber(L, (lua_Number)arg1);"));
}

#[test]
fn replaced_type_is_used_by_later_wraps() {
    init_tracing();
    let mut session = Session::with_builtin_types();
    let quiet = TypeDef::new(
        "double",
        HookSet::new()
            .with_helpname(|_| "number".to_string())
            .with_declare(|arg| format!("lua_Number {};", arg.var()))
            .with_check(|_, idx| format!("lua_isnumber(L, {})", idx))
            .with_read(|arg, idx| format!("{} = lua_tonumber(L, {});", arg.var(), idx))
            .with_carg(|arg| arg.var()),
    )
    .accepting(DefaultKinds::empty());

    let previous = session.register_type(quiet);
    assert!(previous.is_some());

    session.wrap("show", [("show_number", vec![ArgumentSpec::new("double")])]).unwrap();
    let source = session.to_source();
    assert!(source.contains("lua_Number arg1;"));
    assert!(source.contains("expected arguments: number"));
    assert!(source.contains("show_number(arg1);\nreturn 0;"));
}

#[test]
fn missing_hook_is_reported() {
    let mut session = Session::new();
    session.register_type(TypeDef::new(
        "opaque",
        HookSet::new().with_helpname(|_| "opaque".to_string()),
    ));

    let err = session
        .wrap("use", [("use_opaque", vec![ArgumentSpec::new("opaque")])])
        .unwrap_err();
    assert!(matches!(err.root(), GenerationError::MissingHook { .. }));
    assert_eq!(session.to_source(), "");
}

// =============================================================================
// File output
// =============================================================================

#[test]
fn write_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wrappers.c");
    let session = session_with_abs();

    session.write_to(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), session.to_source());
}

#[test]
fn write_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent").join("wrappers.c");
    let session = session_with_abs();

    let err = session.write_to(&path).unwrap_err();
    match &err {
        SessionError::Io { path: failed, .. } => assert_eq!(failed, &path),
        other => panic!("expected an io error, got {other:?}"),
    }
    assert!(err.as_generation().is_none());
    assert!(err.to_string().starts_with("failed to write"));
}

#[test]
fn generation_errors_convert_into_session_errors() {
    fn wrap_all(session: &mut Session) -> Result<(), SessionError> {
        session.wrap("bad", [("bad", vec![ArgumentSpec::new("Quaternion")])])?;
        Ok(())
    }

    let mut session = Session::with_builtin_types();
    let err = wrap_all(&mut session).unwrap_err();
    assert_eq!(
        err.as_generation().map(GenerationError::root),
        Some(&GenerationError::UnknownType("Quaternion".into()))
    );
}
