use test_utils::{check_cases, Case};

#[test]
fn test_push() {
    check_cases(&[
        Case {
            source: r#"using "data";
            using "io";
            let arr = [];
            data.push(arr, 1);
            io.print(arr);"#,
            want: "[1]",
            throws_error: false,
        },
        Case {
            source: r#"using "data";
            using "io";
            let arr = [1, 2, 3, 4];
            data.push(arr, 5);
            io.print(arr);"#,
            want: "[1, 2, 3, 4, 5]",
            throws_error: false,
        },
        Case {
            source: r#"using "data";
            using "io";
            let arr = [];
            data.push(arr, 5);
            io.print(arr[0]);"#,
            want: "5",
            throws_error: false,
        },
        Case {
            source: r#"using "data";
            data.push(1, 2);"#,
            want: "interpreter error: data.push must be used on array type, Number type given",
            throws_error: true,
        },
    ]);
}

#[test]
fn test_pop() {
    check_cases(&[
        Case {
            source: r#"using "data";
            using "io";
            let arr = [1, 2, 3];
            let last = data.pop(arr);
            io.print(last);
            io.print(arr);"#,
            want: "3[1, 2]",
            throws_error: false,
        },
        Case {
            source: r#"using "data";
            let arr = [];
            data.pop(arr);"#,
            want: "interpreter error: cannot pop an empty array",
            throws_error: true,
        },
    ]);
}

#[test]
fn test_size() {
    check_cases(&[
        Case {
            source: r#"using "data";
            using "io";
            let arr = [1, 2, 3, 4, 5];
            io.print(data.size(arr));"#,
            want: "5",
            throws_error: false,
        },
        Case {
            source: r#"using "data";
            using "io";
            let map = {
                "foo": 10,
                "bar": 20,
                "baz": 30,
            };
            io.print(data.size(map));"#,
            want: "3",
            throws_error: false,
        },
        Case {
            source: r#"using "data";
            using "io";
            let arr = [];
            io.print(data.size(arr));"#,
            want: "0",
            throws_error: false,
        },
    ]);
}

#[test]
fn test_size_tracks_pushes_and_pops() {
    check_cases(&[Case {
        source: r#"using "data";
        using "io";
        let arr = [];
        data.push(arr, 1);
        data.push(arr, 2);
        data.push(arr, 3);
        data.pop(arr);
        io.print(data.size(arr));"#,
        want: "2",
        throws_error: false,
    }]);
}

#[test]
fn test_put_tracks_distinct_keys() {
    check_cases(&[Case {
        source: r#"using "data";
        using "io";
        let m = { "a": 1, };
        data.put(m, "b", 2);
        data.put(m, "b", 3);
        io.print(data.size(m));"#,
        want: "2",
        throws_error: false,
    }]);
}
