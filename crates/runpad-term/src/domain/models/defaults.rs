//! Fixed buffer defaults and user-visible literals.
//!
//! The default program exists exactly once, here, so the startup buffer and
//! the reset action can never diverge.

pub const DEFAULT_SOURCE: &str = r#"#include <iostream>
using namespace std;

int main()
{
    int divisor, dividend, quotient, remainder;

    cout << "Enter dividend: ";
    cin >> dividend;

    cout << "Enter divisor: ";
    cin >> divisor;

    // Add error handling for division by zero
    if (divisor == 0) {
        cout << "Error: Cannot divide by zero!" << endl;
        return 1;
    }

    quotient = dividend / divisor;
    remainder = dividend % divisor;

    cout << "Quotient = " << quotient << endl;
    cout << "Remainder = " << remainder << endl;

    return 0;
}"#;

pub const DEFAULT_STDIN: &str = "20\n3";

pub const RUNNING_MESSAGE: &str = "Running...";

pub const OUTPUT_PLACEHOLDER: &str = "No output yet. Press Ctrl+R to run your program.";

pub const SOURCE_PLACEHOLDER: &str = "Write your C++ code here...";

pub const STDIN_PLACEHOLDER: &str = "Enter program input here (one value per line)...";

/// What a Tab keystroke inserts in the source pane.
pub const TAB_SPACES: &str = "    ";
