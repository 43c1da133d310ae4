//! 编程语言注册表
//!
//! 每种受支持的语言都有固定的 slug、显示名称、文件匹配模式和后缀。

use phf::phf_map;

/// 编程语言枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgLang {
    /// C++
    Cpp,
    /// C#
    CSharp,
    /// Java
    Java,
    /// Python
    Python,
    /// TypeScript
    TypeScript,
}

/// slug → 语言 的静态查找表
static LANGUAGES: phf::Map<&'static str, ProgLang> = phf_map! {
    "cpp" => ProgLang::Cpp,
    "csharp" => ProgLang::CSharp,
    "java" => ProgLang::Java,
    "python" => ProgLang::Python,
    "typescript" => ProgLang::TypeScript,
};

impl ProgLang {
    /// 所有受支持的语言
    pub const ALL: [ProgLang; 5] = [
        ProgLang::Cpp,
        ProgLang::CSharp,
        ProgLang::Java,
        ProgLang::Python,
        ProgLang::TypeScript,
    ];

    /// 获取 slug（命令行和账本中使用的标识）
    pub fn slug(self) -> &'static str {
        match self {
            ProgLang::Cpp => "cpp",
            ProgLang::CSharp => "csharp",
            ProgLang::Java => "java",
            ProgLang::Python => "python",
            ProgLang::TypeScript => "typescript",
        }
    }

    /// 获取显示名称（写入提示词）
    pub fn name(self) -> &'static str {
        match self {
            ProgLang::Cpp => "C++",
            ProgLang::CSharp => "C#",
            ProgLang::Java => "Java",
            ProgLang::Python => "Python",
            ProgLang::TypeScript => "TypeScript",
        }
    }

    /// 默认的文件匹配模式
    pub fn glob_pattern(self) -> &'static str {
        match self {
            ProgLang::Cpp => "*.cpp",
            ProgLang::CSharp => "*.cs",
            ProgLang::Java => "*.java",
            ProgLang::Python => "*.py",
            ProgLang::TypeScript => "*.ts",
        }
    }

    /// 文件后缀（带点）
    pub fn suffix(self) -> &'static str {
        match self {
            ProgLang::Cpp => ".cpp",
            ProgLang::CSharp => ".cs",
            ProgLang::Java => ".java",
            ProgLang::Python => ".py",
            ProgLang::TypeScript => ".ts",
        }
    }

    /// 代码块围栏上可能出现的语言标记
    pub fn fence_tags(self) -> &'static [&'static str] {
        match self {
            ProgLang::Cpp => &["cpp", "c++"],
            ProgLang::CSharp => &["csharp", "cs", "c#"],
            ProgLang::Java => &["java"],
            ProgLang::Python => &["python", "py"],
            ProgLang::TypeScript => &["typescript", "ts"],
        }
    }

    /// 从 slug 解析语言（精确匹配）
    pub fn from_slug(slug: &str) -> Option<Self> {
        LANGUAGES.get(slug).copied()
    }
}

impl std::fmt::Display for ProgLang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
