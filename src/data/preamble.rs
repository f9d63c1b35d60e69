//! LaTeX preamble and table macros
//!
//! Everything emitted by the table engine is a call to one of the `\gr...`
//! macros defined here. The width macros do the measuring and arithmetic
//! at compile time; `core::latexdoc::table::simulate` mirrors them.

/// Package setup, lengths, counters and macros, ending with `\begin{document}`.
///
/// Written after the `\documentclass` and `geometry` lines when the preamble
/// is enabled.
pub const LATEX_TEMPLATE: &str = r##"%
\usepackage[T1]{fontenc}%
%
% Input is UTF-8; older installations may need the ucs package for it.
%
\usepackage[utf8]{inputenc}%
\usepackage{graphicx}% Extended graphics support
\usepackage{longtable}% For multi-page tables
\usepackage{calc}% For some calculations
\usepackage{ifthen}% For table width calculations
\usepackage{ragged2e}% For left aligning with hyphenation
\usepackage{wrapfig}% wrap pictures in text
\usepackage{hyperref}% for internal and external links
\usepackage{xcolor}% to colorize links
\hypersetup{
    colorlinks,
    linkcolor={red!50!black},
    citecolor={blue!50!black},
    urlcolor={blue!80!black}
}%
\IfFileExists{libertine.sty}{
    \usepackage{libertine}
}{}%
% Depending on your LaTeX installation, the margins may be too
% narrow.  This can be corrected by uncommenting the following
% two lines and adjusting the width appropriately. The example
% removes 0.5in from each margin. (Adds 1 inch to the text)
%\addtolength{\oddsidemargin}{-0.5in}%
%\addtolength{\textwidth}{1.0in}%
%
% Vertical spacing between paragraphs:
% take one of three possibilities or modify to your taste:
%\setlength{\parskip}{1.0ex plus0.2ex minus0.2ex}%
\setlength{\parskip}{1.5ex plus0.3ex minus0.3ex}%
%\setlength{\parskip}{2.0ex plus0.4ex minus0.4ex}%
%
% Vertical spacing between lines:
% take one of three possibilities or modify to your taste:
\renewcommand{\baselinestretch}{1.0}%
%\renewcommand{\baselinestretch}{1.1}%
%\renewcommand{\baselinestretch}{1.2}%
%
% Indentation; the unit for all indents and picture sizes,
% 2.5em is right for 12pt
% take one of three possibilities or modify to your taste:
\newlength{\grbaseindent}%
%\setlength{\grbaseindent}{3.0em}%
\setlength{\grbaseindent}{2.5em}%
%\setlength{\grbaseindent}{2.0em}%
%
%
% -------------------------------------------------------------
% New lengths, counters and commands for calculations in tables
% -------------------------------------------------------------
%
\newlength{\grtabwidth}%
\newlength{\grtabprepos}%
\newlength{\grreqwidth}%
\newlength{\grtempwd}%
\newlength{\grmaxwidth}%
\newlength{\grprorated}%
\newlength{\grxwd}%
\newlength{\grwidthused}%
\newlength{\grreduce}%
\newlength{\grcurcolend}%
\newlength{\grspanwidth}%
\newlength{\grleadlabelwidth}%
\newlength{\grminpgindent}%
\newlength{\grlistbacksp}%
\newlength{\grpictsize}%
\newlength{\grmaxpictsize}%
\newlength{\grtextsize}%
\newlength{\grmaxtextsize}%
\newcounter{grtofixcnt}%
\newcounter{grxwdcolcnt}%
%
%
\newcommand{\grinitlength}[2]{%
  \ifthenelse{\isundefined{#1}}%
    {\newlength{#1}}{}%
  \setlength{#1}{#2}%
}%
%
\newcommand{\grinittab}[2]{%    #1: tabwidth, #2 = 1.0/anz-cols
  \setlength{\grtabwidth}{#1}%
  \setlength{\grprorated}{#2\grtabwidth}%
  \setlength{\grwidthused}{0em}%
  \setlength{\grreqwidth}{0em}%
  \setlength{\grmaxwidth }{0em}%
  \setlength{\grxwd}{0em}%
  \setlength{\grtempwd}{0em}%
  \setlength{\grreduce}{0em}%
  \setlength{\grpictsize}{0em}%
  \setlength{\grmaxpictsize}{0em}%
  \setlength{\grtextsize}{0em}%
  \setlength{\grmaxtextsize}{0em}%
  \setlength{\grcurcolend}{0em}%
  \setcounter{grxwdcolcnt}{0}%
  \setcounter{grtofixcnt}{0}%  number of wide cols%
  \grinitlength{\grcolbega}{0em}% beg of first col
}%
%
\newcommand{\grmaxvaltofirst}[2]{%
  \ifthenelse{\lengthtest{#1 < #2}}%
    {\setlength{#1}{#2}}{}%
}%
%
\newcommand{\grminvaltofirst}[2]{%
  \ifthenelse{\lengthtest{#1 > #2}}%
    {\setlength{#1}{#2}}{}%
}%
%
% requirement of one cell is complete: fold it into the column maximum
\newcommand{\grsetreqfull}{%
  \grmaxvaltofirst{\grmaxpictsize}{\grpictsize}%
  \grmaxvaltofirst{\grmaxtextsize}{\grtextsize}%
  \setlength{\grpictsize}{0em}%
  \setlength{\grtextsize}{0em}%
}%
%
% #1: begin of the first column of a span ending in the current column
\newcommand{\grsetreqpart}[1]{%
  \addtolength{\grtextsize}{#1 - \grcurcolend}%
  \addtolength{\grpictsize}{#1 - \grcurcolend}%
  \grsetreqfull%
}%
%
% equal share of the width left for the columns still to fix
\newcommand{\grdividelength}{%
  \setlength{\grtempwd}{\grtabwidth - \grwidthused}%
  \setlength{\grreduce}{0em}%
  \ifthenelse{\value{grtofixcnt} > 0}%
    {\setlength{\grxwd}{\grtempwd}%
     \divide\grxwd by \value{grtofixcnt}}%
    {\setlength{\grxwd}{0em}}%
}%
%
\newcommand{\grtextneedwidth}[1]{%
  \settowidth{\grtempwd}{#1}%
  \grmaxvaltofirst{\grtextsize}{\grtempwd}%
}%
%
% #1: width taken from \grtempwd, #2: final width of the column
\newcommand{\grfixcolumn}[2]{%
  \addtolength{\grreduce}{#1 - \grtempwd}%
  \setlength{#1}{\grtempwd}%
  \addtolength{\grwidthused}{#1}%
  \addtocounter{grtofixcnt}{-1}%
  \setlength{#2}{#1}%
}%
%
\newcommand{\grcolsfirstfix}[5]{%
  \grinitlength{#1}{\grcurcolend}%
  \grinitlength{#3}{0em}%
  \grinitlength{#4}{\grmaxpictsize}%
  \grinitlength{#5}{\grmaxtextsize}%
  \grinitlength{#2}{#5}%
  \grmaxvaltofirst{#2}{#4}%
  \addtolength{#2}{2\tabcolsep}%
  \grmaxvaltofirst{\grmaxwidth}{#2}%
  \ifthenelse{\lengthtest{#2 < \grprorated}}%
    { \setlength{#3}{#2}%
      \addtolength{\grwidthused}{#2} }%
    { \stepcounter{grtofixcnt} }%
  \addtolength{\grcurcolend}{#2}%
  \setlength{\grmaxpictsize}{0em}%
  \setlength{\grmaxtextsize}{0em}%
}%
%
\newcommand{\grcolssecondfix}[4]{%
  \ifthenelse{\lengthtest{\grcurcolend < \grtabwidth}}%
    { \ifthenelse{\lengthtest{#3 = 0em}}%
        { \setlength{\grtempwd}{#2}%
          \grfixcolumn{#2}{#3}}{}}%
    { \addtolength{#1}{-\grreduce}%
      \ifthenelse{\lengthtest{#3 = 0em}}%
        { \ifthenelse{\lengthtest{#2 = \grmaxwidth}}%
            { \stepcounter{grxwdcolcnt}%
              \setlength{\grtempwd}{\grxwd}%
              \grfixcolumn{#2}{#3}}%
            { \ifthenelse{\lengthtest{#4 > 0em}}%
                { \setlength{\grtempwd}{\grxwd}%
                  \grminvaltofirst{\grtempwd}{#2}%
                  \grfixcolumn{#2}{#3}}{}}}{}}%
}%
%
\newcommand{\grcolsthirdfix}[3]{%
  \ifthenelse{\lengthtest{\grcurcolend < \grtabwidth}}%
    {}{ \addtolength{#1}{-\grreduce}%
        \ifthenelse{\lengthtest{#3 = 0em} \and %
                     \lengthtest{#2 < \grmaxwidth}}%
          { \ifthenelse{\lengthtest{#2 < 0.5\grmaxwidth}}%
              { \setlength{\grtempwd}{0.5\grxwd}}%
              { \setlength{\grtempwd}{\grxwd}}%
            \grfixcolumn{#2}{#3}}{}}%
}%
%
\newcommand{\grcolsfourthfix}[3]{%
  \ifthenelse{\lengthtest{\grcurcolend < \grtabwidth}}%
    {}{ \addtolength{#1}{-\grreduce}%
        \ifthenelse{\lengthtest{#3 = 0em}}%
          { \setlength{\grtempwd}{\grxwd}%
            \grfixcolumn{#2}{#3}}{}}%
}%
%
\newcommand{\grgetspanwidth}[4]{%
  \grinitlength{#1}{#3 - #2 + #4}%
}%
%
\newcommand{\tabheadstrutceil}{%
  \rule[0.0ex]{0.00em}{3.5ex}}%
\newcommand{\tabheadstrutfloor}{%
  \rule[-2.0ex]{0.00em}{2.5ex}}%
\newcommand{\tabrowstrutceil}{%
  \rule[0.0ex]{0.00em}{2.9ex}}%
\newcommand{\tabrowstrutfloor}{%
  \rule[-0.1ex]{0.00em}{2.0ex}}%
%
\newcommand{\grempty}[1]{}%
%
\newcommand{\graddvdots}[1]{%
  \hspace*{\fill}\hspace*{\fill}\raisebox{#1}{\vdots}%
}%
%
\newcommand{\grtabpgbreak}[4]{%
  #1 { \parbox[t]{ #2 - 2\tabcolsep}{\tabheadstrutceil\hspace*{\fill}%
  \raisebox{#4}{\vdots} #3{#4} \hspace*{\fill}\tabheadstrutfloor}}%
}%
%
\newcommand{\grcolpart}[3]{%
  #1 { \parbox[t]{ #2 - 2\tabcolsep}%
  {\tabrowstrutceil #3~\\[-1.6ex]\tabrowstrutfloor}}%
}%
%
\newcommand{\grminpghead}[2]{%
  \setlength{\grminpgindent}{#1\grbaseindent-\grlistbacksp}%
  \hspace*{\grminpgindent}%
  \ifthenelse{\not \lengthtest{#2em > 0em}}%
    {\begin{minipage}[t]{\textwidth -\grminpgindent}}%
    {\begin{minipage}[t]{\textwidth -\grminpgindent%
        -#2\grbaseindent -4\tabcolsep}}%
}%
%
\newcommand{\grminpgtail}{%
  \end{minipage}\parindent0em%
}%
%
\newcommand{\grlisthead}[1]{%
  \begin{list}{#1}%
    { \setlength{\labelsep}{0.5em}%
      \setlength{\labelwidth}{\grleadlabelwidth}%
      \setlength{\leftmargin}{\grlistbacksp}%
    }\item%
}%
%
\newcommand{\grlisttail}{%
  \end{list}%
}%
%
\newcommand{\grprepleader}[1]{%
  \settowidth{\grtempwd}{#1}%
  \ifthenelse{\lengthtest{\grtempwd > \grleadlabelwidth}}%
    { \setlength{\grleadlabelwidth}{\grtempwd}}{}%
  \setlength{\grlistbacksp}{\grleadlabelwidth + 1.0em}%
}%
%
\newcommand{\grprepnoleader}{%
  \setlength{\grleadlabelwidth}{0em}%
  \setlength{\grlistbacksp}{0em}%
}%
%
\newcommand{\grmkpicture}[4]{%
    \begin{wrapfigure}{r}{#2\grbaseindent}%
      \vspace{-6ex}%
      \begin{center}%
      \includegraphics[%
        width= #2\grbaseindent,%
        height= #3\grbaseindent,%
          keepaspectratio]%
        {#1}\\%
      {\RaggedRight\footnotesize#4}%
      \end{center}%
    \end{wrapfigure}%
    \settowidth{\grtempwd}{\footnotesize#4}%
    \setlength{\grxwd}{#2\grbaseindent}%
    \ifthenelse{\lengthtest{\grtempwd < 0.7\grxwd}}%
                    {\setlength{\grxwd}{1ex}}{%
      \ifthenelse{\lengthtest{\grtempwd < 1.2\grxwd}}%
                    {\setlength{\grxwd}{2ex}}{%
        \ifthenelse{\lengthtest{\grtempwd < 1.8\grxwd}}%
                    {\setlength{\grxwd}{6ex}}{%
          \ifthenelse{\lengthtest{\grtempwd < 2.0\grxwd}}%
                    {\setlength{\grxwd}{10ex}}{%
                     \setlength{\grxwd}{12ex}}%
                    }}}%
  \setlength{\grtempwd}{#3\grbaseindent + \grxwd}%
  \rule[-\grtempwd]{0pt}{\grtempwd}%
  \setlength{\grtabprepos}{-\grtempwd}%
}%
%
%
\begin{document}%
"##;

/// Closing line written on close when the preamble is enabled
pub const DOCUMENT_END: &str = "\\end{document}\n";

/// Names of every `\newcommand` in [`LATEX_TEMPLATE`]
pub fn defined_macros() -> Vec<&'static str> {
    LATEX_TEMPLATE
        .match_indices("\\newcommand{")
        .filter_map(|(idx, pat)| {
            let rest = &LATEX_TEMPLATE[idx + pat.len()..];
            rest.find('}').map(|end| &rest[..end])
        })
        .collect()
}
