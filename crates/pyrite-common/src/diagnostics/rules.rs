//! The report-rule catalog.
//!
//! One entry per [`DiagnosticRule`] variant: its wire-format name, the
//! strictness tier it first turns on at, and a short description (shown by
//! `--stats`/documentation, never part of a diagnostic message itself).

use super::DiagnosticRule;
use crate::checker_options::DiagnosticTier;

pub struct RuleInfo {
    pub rule: DiagnosticRule,
    pub name: &'static str,
    pub tier: DiagnosticTier,
    pub description: &'static str,
}

macro_rules! rule {
    ($rule:expr, $name:literal, $tier:expr, $desc:literal) => {
        RuleInfo { rule: $rule, name: $name, tier: $tier, description: $desc }
    };
}

pub static DIAGNOSTIC_RULES: &[RuleInfo] = &[
    rule!(DiagnosticRule::GeneralTypeIssues, "reportGeneralTypeIssues", DiagnosticTier::Always, "Catch-all for type errors that don't have a more specific rule"),
    rule!(DiagnosticRule::MissingImports, "reportMissingImports", DiagnosticTier::Always, "Import could not be resolved on any search path"),
    rule!(DiagnosticRule::MissingModuleSource, "reportMissingModuleSource", DiagnosticTier::Always, "Stub found but no corresponding source module"),
    rule!(DiagnosticRule::UnboundVariable, "reportUnboundVariable", DiagnosticTier::Always, "Variable used before being assigned on any reaching path"),
    rule!(DiagnosticRule::SyntaxError, "reportSyntaxError", DiagnosticTier::Always, "Tokenizer or parser could not make sense of the input"),
    rule!(DiagnosticRule::SelfClsParameterName, "reportSelfClsParameterName", DiagnosticTier::Always, "Instance/class method missing a conventional self/cls first parameter"),

    rule!(DiagnosticRule::OptionalSubscript, "reportOptionalSubscript", DiagnosticTier::Basic, "Subscripting a value that may be None"),
    rule!(DiagnosticRule::OptionalMemberAccess, "reportOptionalMemberAccess", DiagnosticTier::Basic, "Accessing an attribute on a value that may be None"),
    rule!(DiagnosticRule::OptionalCall, "reportOptionalCall", DiagnosticTier::Basic, "Calling a value that may be None"),
    rule!(DiagnosticRule::OptionalIterable, "reportOptionalIterable", DiagnosticTier::Basic, "Iterating over a value that may be None"),
    rule!(DiagnosticRule::OptionalContextManager, "reportOptionalContextManager", DiagnosticTier::Basic, "Using a value that may be None as a context manager"),
    rule!(DiagnosticRule::OptionalOperand, "reportOptionalOperand", DiagnosticTier::Basic, "Using a value that may be None as an operator operand"),
    rule!(DiagnosticRule::Redeclaration, "reportRedeclaration", DiagnosticTier::Basic, "Obscured declaration of the same name with an incompatible type"),
    rule!(DiagnosticRule::InvalidStringEscapeSequence, "reportInvalidStringEscapeSequence", DiagnosticTier::Basic, "Unsupported escape sequence in a string literal"),
    rule!(DiagnosticRule::InvalidTypeVarUse, "reportInvalidTypeVarUse", DiagnosticTier::Basic, "Type variable used in a way that violates its binding"),
    rule!(DiagnosticRule::AbstractUsage, "reportAbstractUsage", DiagnosticTier::Basic, "Instantiating a class with unimplemented abstract methods"),
    rule!(DiagnosticRule::ArgumentType, "reportArgumentType", DiagnosticTier::Basic, "Argument not assignable to the corresponding parameter type"),
    rule!(DiagnosticRule::AssignmentType, "reportAssignmentType", DiagnosticTier::Basic, "Assigned value not assignable to the declared type"),
    rule!(DiagnosticRule::AttributeAccessIssue, "reportAttributeAccessIssue", DiagnosticTier::Basic, "Attribute does not exist on the type, or access violates visibility"),
    rule!(DiagnosticRule::CallIssue, "reportCallIssue", DiagnosticTier::Basic, "Call expression does not match any call signature"),
    rule!(DiagnosticRule::IndexIssue, "reportIndexIssue", DiagnosticTier::Basic, "Index expression does not match the type's `__getitem__`/`__setitem__`"),
    rule!(DiagnosticRule::InvalidTypeArguments, "reportInvalidTypeArguments", DiagnosticTier::Basic, "Generic type instantiated with the wrong number or kind of type arguments"),
    rule!(DiagnosticRule::NoOverloadImplementation, "reportNoOverloadImplementation", DiagnosticTier::Basic, "Overloaded function/method has no implementation"),
    rule!(DiagnosticRule::OperatorIssue, "reportOperatorIssue", DiagnosticTier::Basic, "Operator not supported for the operand types"),
    rule!(DiagnosticRule::ReturnType, "reportReturnType", DiagnosticTier::Basic, "Returned value not assignable to the declared return type"),
    rule!(DiagnosticRule::NoMatchingOverload, "reportNoMatchingOverload", DiagnosticTier::Basic, "No overload accepts the given arguments"),
    rule!(DiagnosticRule::InvalidTypeForm, "reportInvalidTypeForm", DiagnosticTier::Basic, "Expression used in a type-annotation position is not a valid type"),
    rule!(DiagnosticRule::TypedDictNotRequiredAccess, "reportTypedDictNotRequiredAccess", DiagnosticTier::Basic, "Accessing a TypedDict key that is not marked Required without a guard"),
    rule!(DiagnosticRule::PossiblyUnboundVariable, "reportPossiblyUnboundVariable", DiagnosticTier::Basic, "Variable bound on some but not all reaching paths"),
    rule!(DiagnosticRule::RevealType, "revealType", DiagnosticTier::Always, "reveal_type()/reveal_locals() informational output"),

    rule!(DiagnosticRule::UnusedImport, "reportUnusedImport", DiagnosticTier::Standard, "Imported symbol is never referenced"),
    rule!(DiagnosticRule::UnusedClass, "reportUnusedClass", DiagnosticTier::Standard, "Private class is never referenced"),
    rule!(DiagnosticRule::UnusedFunction, "reportUnusedFunction", DiagnosticTier::Standard, "Private function is never referenced"),
    rule!(DiagnosticRule::UnusedVariable, "reportUnusedVariable", DiagnosticTier::Standard, "Local variable is assigned but never read"),
    rule!(DiagnosticRule::DuplicateImport, "reportDuplicateImport", DiagnosticTier::Standard, "Module imported more than once in the same file"),
    rule!(DiagnosticRule::UnnecessaryIsInstance, "reportUnnecessaryIsInstance", DiagnosticTier::Standard, "isinstance() check whose result is always true or always false"),
    rule!(DiagnosticRule::UnnecessaryCast, "reportUnnecessaryCast", DiagnosticTier::Standard, "cast() call whose target type already matches the expression's type"),
    rule!(DiagnosticRule::UnnecessaryComparison, "reportUnnecessaryComparison", DiagnosticTier::Standard, "Comparison whose operands' types can never be equal"),
    rule!(DiagnosticRule::UnnecessaryContains, "reportUnnecessaryContains", DiagnosticTier::Standard, "`in` check whose result is always true or always false"),
    rule!(DiagnosticRule::AssertAlwaysTrue, "reportAssertAlwaysTrue", DiagnosticTier::Standard, "assert on a tuple literal, which is always truthy"),
    rule!(DiagnosticRule::UnusedExpression, "reportUnusedExpression", DiagnosticTier::Standard, "Expression statement whose value is discarded and has no side effect"),
    rule!(DiagnosticRule::UnusedCoroutine, "reportUnusedCoroutine", DiagnosticTier::Standard, "Coroutine call result discarded without await"),
    rule!(DiagnosticRule::UnnecessaryTypeIgnoreComment, "reportUnnecessaryTypeIgnoreComment", DiagnosticTier::Standard, "`# type: ignore` on a line with no suppressed diagnostic"),
    rule!(DiagnosticRule::IncompatibleMethodOverride, "reportIncompatibleMethodOverride", DiagnosticTier::Standard, "Overriding method's signature is not compatible with the base class's"),
    rule!(DiagnosticRule::IncompatibleVariableOverride, "reportIncompatibleVariableOverride", DiagnosticTier::Standard, "Overriding class variable's type is not compatible with the base class's"),
    rule!(DiagnosticRule::OverlappingOverload, "reportOverlappingOverload", DiagnosticTier::Standard, "Overload signature is shadowed by an earlier, broader overload"),
    rule!(DiagnosticRule::InvalidOverload, "reportInvalidOverload", DiagnosticTier::Standard, "Invalid combination or placement of @overload declarations"),
    rule!(DiagnosticRule::ConstantRedefinition, "reportConstantRedefinition", DiagnosticTier::Standard, "Module-level constant (ALL_CAPS name) is reassigned"),
    rule!(DiagnosticRule::InconsistentConstructor, "reportInconsistentConstructor", DiagnosticTier::Standard, "__init__ and __new__ signatures are inconsistent"),
    rule!(DiagnosticRule::UninitializedInstanceVariable, "reportUninitializedInstanceVariable", DiagnosticTier::Standard, "Declared instance variable is never initialized in __init__"),
    rule!(DiagnosticRule::ImportCycles, "reportImportCycles", DiagnosticTier::Standard, "Modules import each other in a cycle"),
    rule!(DiagnosticRule::Unreachable, "reportUnreachable", DiagnosticTier::Standard, "Code after this point can never execute"),

    rule!(DiagnosticRule::PrivateUsage, "reportPrivateUsage", DiagnosticTier::Strict, "Access to a name prefixed with _ from outside its declaring module/class"),
    rule!(DiagnosticRule::PrivateImportUsage, "reportPrivateImportUsage", DiagnosticTier::Strict, "Importing a symbol a package's __all__ does not export"),
    rule!(DiagnosticRule::UnsupportedDunderAll, "reportUnsupportedDunderAll", DiagnosticTier::Strict, "__all__ entry does not refer to a module-level symbol"),
    rule!(DiagnosticRule::MissingTypeStubs, "reportMissingTypeStubs", DiagnosticTier::Strict, "Imported module has no type stub and useLibraryCodeForTypes is disabled"),
    rule!(DiagnosticRule::CallInDefaultInitializer, "reportCallInDefaultInitializer", DiagnosticTier::Strict, "Function call used as a parameter default value"),
    rule!(DiagnosticRule::InvalidStubStatement, "reportInvalidStubStatement", DiagnosticTier::Strict, "Statement not allowed inside a .pyi stub file"),
    rule!(DiagnosticRule::IncompleteStub, "reportIncompleteStub", DiagnosticTier::Strict, "Stub references a symbol the partial stub doesn't declare"),
];
