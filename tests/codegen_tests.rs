mod common;

use alanc::analyzer::{ScopeId, Ty};
use alanc::codegen::{Codegen, Heap, Slot, IMAGE_SIZE};
use alanc::error::{CodegenError, Skipped, Stage};
use alanc::lexer::Lexer;
use alanc::parser::Parser;

use common::{assemble_one, compile_one, run_source};

#[test]
fn declaration_assignment_and_print() {
    let assembly = assemble_one("{ int a a = 3 print(a) }$");
    let bytes = assembly.image.bytes();

    assert_eq!(assembly.code_size, 0x11);
    assert_eq!(
        bytes[..0x11],
        [
            0xA9, 0x00, 0x8D, 0x11, 0x00, 0xA9, 0x03, 0x8D, 0x11, 0x00, 0xAC, 0x11, 0x00, 0xA2,
            0x01, 0xFF, 0x00,
        ]
    );
    assert!(bytes[0x11..0xF5].iter().all(|&b| b == 0));
    assert_eq!(&bytes[0xF5..], b"true\0false\0");
    assert_eq!(
        assembly.statics,
        vec![(
            Slot::User {
                name: 'a',
                scope: ScopeId(0),
                ty: Ty::Int,
            },
            0x11
        )]
    );
}

#[test]
fn boolean_literals_load_heap_addresses() {
    let assembly = assemble_one("{ boolean b b = false b = true }$");
    assert_eq!(
        assembly.image.bytes()[..16],
        [
            0xA9, 0x00, 0x8D, 0x10, 0x00, 0xA9, 0xFA, 0x8D, 0x10, 0x00, 0xA9, 0xF5, 0x8D, 0x10,
            0x00, 0x00,
        ]
    );
}

#[test]
fn forward_branch_offset() {
    let assembly = assemble_one("{ if false { print(1) } }$");
    assert_eq!(
        assembly.image.bytes()[..18],
        [
            0xA9, 0xFA, 0x8D, 0x12, 0x00, 0xA2, 0xF5, 0xEC, 0x12, 0x00, 0xD0, 0x05, 0xA0, 0x01,
            0xA2, 0x01, 0xFF, 0x00,
        ]
    );
}

#[test]
fn backward_branch_wraps_around() {
    let assembly = assemble_one("{ while false { } }$");
    assert_eq!(
        assembly.image.bytes()[..20],
        [
            0xA9, 0xFA, 0x8D, 0x14, 0x00, 0xA2, 0xF5, 0xEC, 0x14, 0x00, 0xD0, 0x07, 0xA2, 0x01,
            0xEC, 0xFF, 0x00, 0xD0, 0xED, 0x00,
        ]
    );
    assert_eq!(run_source("{ while false { } }$"), "");
}

#[test]
fn addition_chain_uses_one_temporary_per_operator() {
    let assembly = assemble_one("{ int a a = 1 + 2 + 3 print(a) }$");
    let temporaries = assembly
        .statics
        .iter()
        .filter(|(slot, _)| matches!(slot, Slot::Temporary { .. }))
        .count();
    assert_eq!(temporaries, 2);
    assert_eq!(run_source("{ int a a = 1 + 2 + 3 print(a) }$"), "6");
}

#[test]
fn addition_with_variables() {
    assert_eq!(run_source("{ int a a = 4 print(1 + a) }$"), "5");
    assert_eq!(run_source("{ print(2 + 3) }$"), "5");
    assert_eq!(run_source("{ int a a = 9 a = 9 + a print(1 + a) }$"), "19");
}

#[test]
fn comparisons() {
    assert_eq!(
        run_source("{ print((1 == 1)) print((1 != 1)) print((true == false)) }$"),
        "truefalsefalse"
    );
    assert_eq!(run_source("{ print(((1 == 1) == true)) }$"), "true");
    assert_eq!(run_source("{ print(((1 == 2) != (3 == 4))) }$"), "false");
}

#[test]
fn comparing_variables() {
    let source = "{ int a int b a = 3 b = 1 + 2 if (a == b) { print(\"same\") } }$";
    assert_eq!(run_source(source), "same");
}

#[test]
fn equal_strings_share_an_address() {
    let source = "{ string s s = \"hi\" if (s == \"hi\") { print(\"eq\") } }$";
    assert_eq!(run_source(source), "eq");
}

#[test]
fn string_literals_are_staged_once() {
    let source = "{ print(\"ab\") print(\"ab\") print(\"cd\") }$";
    let assembly = assemble_one(source);
    let bytes = assembly.image.bytes();
    assert_eq!(&bytes[0xEF..0xF5], b"cd\0ab\0");
    assert_eq!(run_source(source), "ababcd");
}

#[test]
fn printing_values() {
    assert_eq!(run_source("{ print(7) }$"), "7");
    assert_eq!(run_source("{ print(true) print(\"\") print(false) }$"), "truefalse");
    assert_eq!(
        run_source("{ string s s = \"hello world\" print(s) }$"),
        "hello world"
    );
    assert_eq!(run_source("{ boolean b b = (2 == 2) print(b) }$"), "true");
}

#[test]
fn if_statement() {
    let source = "{ if (1 == 2) { print(\"no\") } if true { print(\"yes\") } }$";
    assert_eq!(run_source(source), "yes");
}

#[test]
fn while_loop() {
    let source = "{ int a a = 0 while (a != 3) { a = 1 + a print(a) } }$";
    assert_eq!(run_source(source), "123");
}

#[test]
fn nested_loops_reset_inner_declarations() {
    let source = "{
        int i
        i = 0
        while (i != 2) {
            int j
            j = 0
            while (j != 2) {
                print(j)
                j = 1 + j
            }
            i = 1 + i
        }
    }$";
    assert_eq!(run_source(source), "0101");
}

#[test]
fn shadowed_variables_have_their_own_cells() {
    let source = "{ int a a = 1 { int a a = 2 print(a) } print(a) }$";
    assert_eq!(run_source(source), "21");
}

#[test]
fn names_resolve_to_the_declarations_seen_so_far() {
    let source = "{ int a a = 1 { a = 5 int a a = 2 } print(a) }$";
    assert_eq!(run_source(source), "5");
}

#[test]
fn image_layout() {
    let assembly = assemble_one("{ string s s = \"abc\" print(s) }$");
    let bytes = assembly.image.bytes();
    let heap_start = IMAGE_SIZE - (4 + 11);
    let statics_end = assembly.code_size + assembly.statics.len();

    assert_eq!(bytes[assembly.code_size - 1], 0x00);
    assert!(bytes[statics_end..heap_start].iter().all(|&b| b == 0));
    assert_eq!(&bytes[heap_start..], b"abc\0true\0false\0");

    let rendered = assembly.image.to_string();
    let lines = rendered.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 32);
    assert!(lines.iter().all(|l| l.split(' ').count() == 8));
    assert_eq!(lines[0].len(), 8 * 3 - 1);
    assert_eq!(lines[31], "65 00 66 61 6C 73 65 00");
    assert!(!rendered.ends_with('\n'));
}

#[test]
fn code_too_large() {
    let source = format!("{{ {}}}$", "print(1) ".repeat(50));
    let Err(CodegenError::OutOfMemory { code, .. }) = compile_one(&source).codegen else {
        panic!("expected the program not to fit");
    };
    assert_eq!(code, 251);
}

#[test]
fn heap_too_large() {
    let source = format!("{{ print(\"{}\") }}$", "a".repeat(244));
    let Err(CodegenError::StringTooLong { len, heap }) = compile_one(&source).codegen else {
        panic!("expected the string not to fit");
    };
    assert_eq!((len, heap), (244, 11));
}

#[test]
fn heap_staging() {
    let mut heap = Heap::new();
    assert_eq!(heap.address_of("false"), Some(Heap::FALSE_ADDRESS));
    assert_eq!(heap.address_of("true"), Some(Heap::TRUE_ADDRESS));
    assert_eq!(heap.bytes()[heap.len() - 1], 0);

    let Ok(a) = heap.stage("a") else { panic!() };
    assert_eq!(a, 0xF3);
    let Ok(again) = heap.stage("a") else { panic!() };
    assert_eq!(again, 0xF3);
    assert_eq!(heap.start(), 0xF3);
    assert_eq!(heap.len(), 13);

    let long = "b".repeat(IMAGE_SIZE - 13);
    let Err(CodegenError::StringTooLong { len, heap: staged }) = heap.stage(&long) else {
        panic!("expected the string not to fit");
    };
    assert_eq!((len, staged), (IMAGE_SIZE - 13, 13));
    assert_eq!(heap.len(), 13);
}

#[test]
fn refuses_programs_with_semantic_errors() {
    let mut programs = Lexer::tokenize("{ b = 1 }$");
    let (parse, analysis) = Parser::new(programs.remove(0).tokens).parse();
    assert!(parse.succeeded());
    match Codegen::new(&parse, &analysis) {
        Err(skipped) => assert_eq!(skipped, Skipped::new(Stage::Codegen, Stage::Semantic)),
        Ok(_) => panic!("code generation should have been refused"),
    }
}
