#[cfg(test)]
mod dump_tests {
    use crate::parser::*;
    use crate::renderer::*;
    use crate::{dump_source, dump_source_lines};

    fn dump_src(lines: &[&str]) -> Vec<String> {
        let source = lines.join("\n");
        let output = dump_source(&source).unwrap();
        output.split('\n').map(str::to_string).collect()
    }

    #[test]
    fn test_just_a_package() {
        assert_eq!(dump_src(&["package test"]), vec!["File", "  Ident test"]);
    }

    #[test]
    fn test_empty_func_no_args_no_returns() {
        let out = dump_src(&["package test", "func f() {", "}"]);
        assert_eq!(
            out,
            vec![
                "File",
                "  Ident test",
                "  FuncDecl",
                "    Ident f",
                "    FuncType",
                "      FieldList",
                "    BlockStmt",
            ]
        );
    }

    #[test]
    fn test_empty_func_depths() {
        let lines = dump_source_lines("package test\nfunc f() {\n}").unwrap();
        let depths: Vec<usize> = lines.iter().map(|l| l.depth).collect();
        assert_eq!(depths, vec![0, 1, 1, 2, 2, 3, 2]);
    }

    #[test]
    fn test_func_with_typed_args_and_returns() {
        let out = dump_src(&[
            "package test",
            "func f(i int, s string) (bool, error) {",
            "}",
        ]);
        assert_eq!(
            out,
            vec![
                "File",
                "  Ident test",
                "  FuncDecl",
                "    Ident f",
                "    FuncType",
                "      FieldList",
                "        Field",
                "          Ident i",
                "          Ident int",
                "        Field",
                "          Ident s",
                "          Ident string",
                "      FieldList",
                "        Field",
                "          Ident bool",
                "        Field",
                "          Ident error",
                "    BlockStmt",
            ]
        );
    }

    #[test]
    fn test_func_with_println_call() {
        let out = dump_src(&[
            "package test",
            "import \"fmt\"",
            "func f() {",
            "\tfmt.Println(\"hello\")",
            "}",
        ]);
        assert_eq!(
            out,
            vec![
                "File",
                "  Ident test",
                "  GenDecl",
                "    ImportSpec",
                "      BasicLit STRING \"fmt\"",
                "  FuncDecl",
                "    Ident f",
                "    FuncType",
                "      FieldList",
                "    BlockStmt",
                "      ExprStmt",
                "        CallExpr",
                "          SelectorExpr",
                "            Ident fmt",
                "            Ident Println",
                "          BasicLit STRING \"hello\"",
            ]
        );
    }

    #[test]
    fn test_if_true_with_two_returns() {
        let out = dump_src(&[
            "package test",
            "func f() string {",
            "\tif true {",
            "\t\treturn \"a\"",
            "\t} else {",
            "\t\treturn \"b\"",
            "\t}",
            "}",
        ]);
        assert_eq!(
            out,
            vec![
                "File",
                "  Ident test",
                "  FuncDecl",
                "    Ident f",
                "    FuncType",
                "      FieldList",
                "      FieldList",
                "        Field",
                "          Ident string",
                "    BlockStmt",
                "      IfStmt",
                "        Ident true",
                "        BlockStmt",
                "          ReturnStmt",
                "            BasicLit STRING \"a\"",
                "        BlockStmt",
                "          ReturnStmt",
                "            BasicLit STRING \"b\"",
            ]
        );
    }

    #[test]
    fn test_grouped_parameter_names_share_a_field() {
        let out = dump_src(&["package test", "func f(a, b int) {}"]);
        assert_eq!(
            &out[5..],
            &[
                "      FieldList",
                "        Field",
                "          Ident a",
                "          Ident b",
                "          Ident int",
                "    BlockStmt",
            ]
        );
    }

    #[test]
    fn test_unknown_kinds_render_with_fallback() {
        let out = dump_src(&["package test", "func f() {", "\tx := 1 + 2", "\tx++", "}"]);
        assert_eq!(
            &out[6..],
            &[
                "    BlockStmt",
                "      Unknown AssignStmt :=",
                "        Ident x",
                "        Unknown BinaryExpr +",
                "          BasicLit INT 1",
                "          BasicLit INT 2",
                "      Unknown IncDecStmt ++",
                "        Ident x",
            ]
        );
    }

    #[test]
    fn test_method_receiver_comes_first() {
        let out = dump_src(&["package test", "func (s *S) Name() string { return s.name }"]);
        assert_eq!(
            out,
            vec![
                "File",
                "  Ident test",
                "  FuncDecl",
                "    FieldList",
                "      Field",
                "        Ident s",
                "        Unknown StarExpr",
                "          Ident S",
                "    Ident Name",
                "    FuncType",
                "      FieldList",
                "      FieldList",
                "        Field",
                "          Ident string",
                "    BlockStmt",
                "      ReturnStmt",
                "        SelectorExpr",
                "          Ident s",
                "          Ident name",
            ]
        );
    }

    #[test]
    fn test_else_if_chain_nests_if_statements() {
        let out = dump_src(&[
            "package test",
            "func f(n int) {",
            "\tif n < 0 {",
            "\t} else if n == 0 {",
            "\t} else {",
            "\t}",
            "}",
        ]);
        assert_eq!(
            &out[9..],
            &[
                "    BlockStmt",
                "      IfStmt",
                "        Unknown BinaryExpr <",
                "          Ident n",
                "          BasicLit INT 0",
                "        BlockStmt",
                "        IfStmt",
                "          Unknown BinaryExpr ==",
                "            Ident n",
                "            BasicLit INT 0",
                "          BlockStmt",
                "          BlockStmt",
            ]
        );
    }

    #[test]
    fn test_dump_is_idempotent() {
        let file = parse_file("package test\nimport \"fmt\"\nfunc f() { fmt.Println(1) }").unwrap();
        let dumper = AstDumper::default();
        assert_eq!(dumper.dump(&file), dumper.dump(&file));
        assert_eq!(dumper.dump_lines(&file), dumper.dump_lines(&file));
    }

    #[test]
    fn test_depth_matches_ancestor_count() {
        let file = parse_file(
            "package test\nfunc f(xs []int) int {\n\tfor _, x := range xs {\n\t\tif x > 0 { return x }\n\t}\n\treturn -1\n}",
        )
        .unwrap();

        // Reference depths by explicit ancestor counting
        fn collect<'a>(node: Node<'a>, ancestors: usize, out: &mut Vec<usize>) {
            out.push(ancestors);
            for child in node.children() {
                collect(child, ancestors + 1, out);
            }
        }
        let mut expected = Vec::new();
        collect(Node::from(&file), 0, &mut expected);

        let depths: Vec<usize> = dump_lines(&file).iter().map(|l| l.depth).collect();
        assert_eq!(depths, expected);
    }

    #[test]
    fn test_subtree_lines_are_contiguous() {
        let file = parse_file("package test\nfunc a() {}\nfunc b(x int) {}").unwrap();
        let lines = dump_lines(&file);

        // Every line after a node at depth d and before the next line at
        // depth <= d belongs to that node's subtree.
        let start = lines.iter().position(|l| l.label == "Ident a").unwrap() - 1;
        let end = start
            + 1
            + lines[start + 1..]
                .iter()
                .position(|l| l.depth <= lines[start].depth)
                .unwrap();
        let labels: Vec<&str> = lines[start..end].iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["FuncDecl", "Ident a", "FuncType", "FieldList", "BlockStmt"]);
        assert_eq!(lines[end].label, "FuncDecl");
    }

    #[test]
    fn test_every_line_has_a_label() {
        let file = parse_file(
            "package test\nvar (\n\ta, b int = 1, 2\n)\ntype M map[string][]*T\nfunc f(args ...string) { goto done }",
        )
        .unwrap();
        for style in [LabelStyle::Classic, LabelStyle::Full] {
            let dumper = AstDumper::new(RenderContext::new().with_labels(style));
            assert!(dumper.dump_lines(&file).iter().all(|l| !l.label.is_empty()));
        }
    }

    #[test]
    fn test_full_labels_replace_unknown() {
        let file = parse_file("package test\nvar x = -y").unwrap();
        let dumper = AstDumper::new(RenderContext::new().with_labels(LabelStyle::Full));
        assert_eq!(
            dumper.dump(&file),
            "File\n  Ident test\n  GenDecl\n    ValueSpec\n      Ident x\n      UnaryExpr -\n        Ident y"
        );
    }

    #[test]
    fn test_base_depth_offsets_every_line() {
        let file = parse_file("package test").unwrap();
        let dumper = AstDumper::new(RenderContext::new().with_depth(2));
        assert_eq!(dumper.dump(&file), "    File\n      Ident test");
    }

    #[test]
    fn test_subtree_dump_starts_at_zero() {
        let file = parse_file("package test\nfunc f() {}").unwrap();
        let Decl::Func(func) = &file.decls[0] else {
            panic!("expected a function declaration");
        };
        let out = AstDumper::default().dump(Node::FuncType(&func.ty));
        assert_eq!(out, "FuncType\n  FieldList");
    }

    #[test]
    fn test_json_output() {
        let file = parse_file("package test").unwrap();
        let dumper = AstDumper::new(RenderContext::new().with_format(OutputFormat::Json));
        let json = dumper.render(&file).unwrap();

        let lines: Vec<RenderLine> = serde_json::from_str(&json).unwrap();
        assert_eq!(
            lines,
            vec![RenderLine::new(0, "File"), RenderLine::new(1, "Ident test")]
        );
    }
}
