#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    CFamily,
    Assembly,
    Unknown,
    /// No `.` anywhere in the path
    Error,
}

const C_FAMILY_EXTENSIONS: [&str; 5] = [".c", ".cpp", ".cs", ".h", ".hpp"];
const ASSEMBLY_EXTENSION: &str = ".asm";

impl FileType {
    /// Classifies by everything from the last `.` in `path`, ignoring case
    pub fn classify(path: &str) -> Self {
        let Some(dot) = path.rfind('.') else {
            return Self::Error;
        };
        let extension = &path[dot..];
        if C_FAMILY_EXTENSIONS
            .iter()
            .any(|e| extension.eq_ignore_ascii_case(e))
        {
            Self::CFamily
        } else if extension.eq_ignore_ascii_case(ASSEMBLY_EXTENSION) {
            Self::Assembly
        } else {
            Self::Unknown
        }
    }

    pub const fn comment_prefix(self) -> &'static str {
        match self {
            Self::CFamily => "// ",
            Self::Assembly => "; ",
            Self::Unknown | Self::Error => "",
        }
    }
}
